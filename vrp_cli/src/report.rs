use comfy_table::{Cell, CellAlignment, Table, presets::UTF8_FULL};
use vrp_optimizer::solver::accepted_solution::SolutionSummary;

pub fn summary_table(summary: &SolutionSummary) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["indicator", "value"])
        .add_row(vec![
            Cell::new("costs"),
            Cell::new(format!("{:.2}", summary.total_cost)).set_alignment(CellAlignment::Right),
        ])
        .add_row(vec![
            Cell::new("distance"),
            Cell::new(format!("{:.2}", summary.total_distance))
                .set_alignment(CellAlignment::Right),
        ])
        .add_row(vec![
            Cell::new("routes"),
            Cell::new(summary.routes.len()).set_alignment(CellAlignment::Right),
        ])
        .add_row(vec![
            Cell::new("unassigned"),
            Cell::new(summary.unassigned_jobs.len()).set_alignment(CellAlignment::Right),
        ])
        .add_row(vec![Cell::new("score"), Cell::new(summary.score)]);

    table
}

pub fn routes_table(summary: &SolutionSummary) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "route",
        "vehicle",
        "type",
        "activities",
        "distance",
        "costs",
        "end",
    ]);

    for (index, route) in summary.routes.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(&route.vehicle),
            Cell::new(&route.vehicle_type),
            Cell::new(route.activities.join(" -> ")),
            Cell::new(format!("{:.2}", route.distance)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.2}", route.cost)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.2}", route.end_time)).set_alignment(CellAlignment::Right),
        ]);
    }

    if !summary.unassigned_jobs.is_empty() {
        table.add_row(vec![
            Cell::new("-"),
            Cell::new("unassigned"),
            Cell::new(""),
            Cell::new(summary.unassigned_jobs.join(", ")),
        ]);
    }

    table
}
