#![no_main]

use libfuzzer_sys::fuzz_target;
use waypoint_core::model::{Project, Status};
use waypoint_nav::hierarchy::count_nodes;
use waypoint_nav::{NavigatorFilters, build_hierarchy, diagnose, filter_for_navigator};

// Input: a JSON project array, optionally followed by a NUL byte and a query.
// The focus title is taken from the first project when there is one.
fuzz_target!(|data: &[u8]| {
    let (catalog, query) = match data.iter().position(|&b| b == 0) {
        Some(split) => (&data[..split], &data[split + 1..]),
        None => (data, &[][..]),
    };

    let Ok(projects) = serde_json::from_slice::<Vec<Project>>(catalog) else {
        return;
    };
    let query = String::from_utf8_lossy(query).into_owned();

    let mut filters = NavigatorFilters::default().query(query);
    let plain = filter_for_navigator(&projects, &filters);
    assert!(plain.visible_count <= projects.len());

    if let Some(first) = projects.first() {
        filters = filters.focus(first.title.clone());
    }
    filters.toggle_status(Status::Archived);
    let focused = filter_for_navigator(&projects, &filters);
    assert!(focused.focus_count <= focused.visible_count);
    assert_eq!(focused.total_count, projects.len());

    let forest = build_hierarchy(&projects);
    assert_eq!(count_nodes(&forest), projects.len());

    let report = diagnose(&projects);
    assert_eq!(report.total, projects.len());
});
