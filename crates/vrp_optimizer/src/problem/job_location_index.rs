use rstar::{RTree, primitives::GeomWithData};

use crate::problem::job::{ActivityId, Job};
use crate::utils::enumerate_idx::EnumerateIdx;

use super::location::Location;

type IndexedActivity = GeomWithData<[f64; 2], ActivityId>;

/// Spatial index over every job activity, used by proximity-based ruins.
pub struct JobLocationIndex {
    tree: RTree<IndexedActivity>,
}

impl JobLocationIndex {
    pub fn new(locations: &[Location], jobs: &[Job]) -> JobLocationIndex {
        let points = jobs
            .iter()
            .enumerate_idx()
            .flat_map(|(job_id, job)| {
                job.activity_ids(job_id)
                    .zip(job.tasks())
                    .map(|(activity_id, task)| {
                        let location = &locations[task.location_id()];
                        IndexedActivity::new(location.into(), activity_id)
                    })
                    .collect::<Vec<_>>()
            })
            .collect();

        JobLocationIndex {
            tree: RTree::bulk_load(points),
        }
    }

    /// Activities ordered by increasing distance to `location`.
    pub fn nearest_neighbor_iter<'a>(
        &'a self,
        location: &Location,
    ) -> impl Iterator<Item = ActivityId> + 'a {
        self.tree
            .nearest_neighbor_iter(&[location.x(), location.y()])
            .map(|point| point.data)
    }
}
