// Copyright (c) The route-conformance Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The built-in scenario catalog for the campus route planner.
//!
//! Dijkstra fixed-order routes, traveling-salesman flexible-order tours, and
//! the connectivity cases where the planner must refuse locations on the
//! disconnected old campus. Expected ranges come from the reference campus
//! map; tour ranges are loose because the planner's tour heuristic does not
//! promise an optimal order.

use crate::list::{QueryMode, Scenario, ScenarioList};
use std::sync::LazyLock;

/// The full, ordered catalog. Constructed once; immutable for the life of
/// the process.
pub static SCENARIOS: LazyLock<ScenarioList> = LazyLock::new(|| {
    ScenarioList::new(vec![
        Scenario::new(
            "TC1: Small Fixed Order (Dijkstra)",
            QueryMode::FixedOrder,
            ["Main Gate", "CSE Building", "Library"],
            5.0,
            5.0,
        )
        .check_stops()
        .with_description("Basic Dijkstra route"),
        Scenario::new(
            "TC2: Small TSP (Flexible)",
            QueryMode::FlexibleOrder,
            ["Main Gate", "Dining Hall", "Library", "Hostel A"],
            12.0,
            18.0,
        )
        .with_description("4-node TSP on small cluster"),
        Scenario::new(
            "TC3: Adjacent Locations (Fixed)",
            QueryMode::FixedOrder,
            ["Garden Park", "Bus Stop"],
            2.0,
            2.0,
        )
        .check_stops()
        .with_description("Direct adjacency"),
        Scenario::new(
            "TC4: Distant Locations TSP",
            QueryMode::FlexibleOrder,
            [
                "Main Gate",
                "Innovation Center",
                "Research Block",
                "Sports Complex",
                "Student Activity Center",
            ],
            15.0,
            40.0,
        )
        .with_description("Large TSP across far-apart nodes"),
        Scenario::new(
            "TC5: Star Pattern Fixed",
            QueryMode::FixedOrder,
            ["CSE Building", "Library", "Lecture Hall Complex", "CSE Building"],
            6.0,
            6.0,
        )
        .check_stops()
        .with_description("Classic hub traversal"),
        Scenario::new(
            "TC6: Medium TSP (10 Locations)",
            QueryMode::FlexibleOrder,
            [
                "Main Gate",
                "Admin Block",
                "Parking Lot",
                "CSE Building",
                "Library",
                "Dining Hall",
                "Medical Center",
                "Canteen",
                "Lecture Hall Complex",
                "Innovation Center",
            ],
            20.0,
            80.0,
        )
        .with_description("10-node medium TSP"),
        Scenario::new(
            "TC7: Single Location",
            QueryMode::FlexibleOrder,
            ["Main Gate"],
            0.0,
            0.0,
        )
        .with_description("Single location"),
        Scenario::new(
            "TC8: Two Locations Fixed",
            QueryMode::FixedOrder,
            ["Library", "Lecture Hall Complex"],
            2.0,
            2.0,
        )
        .check_stops()
        .with_description("Adjacent academic nodes"),
        Scenario::new(
            "TC9: Two Locations Flexible",
            QueryMode::FlexibleOrder,
            ["Library", "Lecture Hall Complex"],
            2.0,
            2.0,
        )
        .with_description("2-node TSP"),
        Scenario::new(
            "TC10: Circular Fixed Route",
            QueryMode::FixedOrder,
            [
                "Main Gate",
                "CSE Building",
                "Library",
                "Dining Hall",
                "Hostel A",
                "Main Gate",
            ],
            17.0,
            17.0,
        )
        .check_stops()
        .with_description("Cycle route"),
        Scenario::new(
            "TC11: Large TSP Greedy",
            QueryMode::FlexibleOrder,
            [
                "Main Gate",
                "Admin Block",
                "CSE Building",
                "Library",
                "Dining Hall",
                "Canteen",
                "Medical Center",
                "Sports Complex",
                "Student Activity Center",
                "Old Boys Hostel",
                "Lecture Hall Complex",
                "Lecture Hall B",
                "Workshop",
                "Research Block",
                "Innovation Center",
            ],
            40.0,
            150.0,
        )
        .with_description("Greedy TSP on >15 nodes"),
        Scenario::new(
            "TC12: Academic Buildings Tour",
            QueryMode::FlexibleOrder,
            [
                "CSE Building",
                "Library",
                "Lecture Hall Complex",
                "Lecture Hall B",
                "Research Block",
                "Innovation Center",
            ],
            10.0,
            40.0,
        )
        .with_description("Academic cluster TSP"),
        Scenario::new(
            "TC13: Food Places Tour",
            QueryMode::FlexibleOrder,
            ["Dining Hall", "Canteen", "Cafeteria"],
            25.0,
            40.0,
        )
        .with_description("Food cluster"),
        Scenario::new(
            "DSU-T1: Connected Nodes",
            QueryMode::FixedOrder,
            ["Main Gate", "Library"],
            1.0,
            100.0,
        )
        .with_description("Connected campus nodes"),
        Scenario::new(
            "DSU-T2: IITJ vs Old Campus",
            QueryMode::FixedOrder,
            ["Main Gate", "Old Campus Gate"],
            0.0,
            0.0,
        )
        .expect_rejection()
        .with_description("Old Campus should be rejected"),
        Scenario::new(
            "DSU-T3: Mixed Nodes",
            QueryMode::FlexibleOrder,
            ["Library", "Old Library", "Sports Complex"],
            0.0,
            0.0,
        )
        .expect_rejection()
        .with_description("Mixed bad node"),
        Scenario::new(
            "DSU-T4: Single Old Campus Node",
            QueryMode::FlexibleOrder,
            ["Old Campus Gate"],
            0.0,
            0.0,
        )
        .with_description("Single invalid node (allowed)"),
    ])
});
