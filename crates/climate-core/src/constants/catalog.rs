// ABOUTME: Fixed text catalogs for health hazards and emergency actions
// ABOUTME: Shared by the health impact mapper and recommendation engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Immediate health hazards triggered by flooding
pub const FLOOD_IMMEDIATE_HAZARDS: [&str; 3] = [
    "Risk of waterborne diseases",
    "Injury from debris",
    "Water contamination exposure",
];

/// Ongoing health hazards triggered by heatwaves
pub const HEATWAVE_ONGOING_HAZARDS: [&str; 3] = [
    "Heat exhaustion risk",
    "Cardiovascular strain",
    "Respiratory issues",
];

/// Long-term health hazards triggered by blackouts
pub const BLACKOUT_LONGTERM_HAZARDS: [&str; 3] = [
    "Medical equipment disruption",
    "Food safety concerns",
    "Mental health impacts",
];

/// Critical tier: evacuation
pub mod evacuation {
    /// Action text
    pub const ACTION: &str = "Prepare for immediate evacuation";
    /// Priority (1 = most urgent)
    pub const PRIORITY: u8 = 1;
    /// Timeline
    pub const TIMELINE: &str = "Within 6 hours";
    /// Resources to gather
    pub const RESOURCES: [&str; 3] = ["Emergency kit", "Vehicle fuel", "Important documents"];
}

/// Important tier: backup power
pub mod backup_power {
    /// Action text
    pub const ACTION: &str = "Secure backup power supply";
    /// Priority
    pub const PRIORITY: u8 = 2;
    /// Timeline
    pub const TIMELINE: &str = "Within 24 hours";
    /// Resources to gather
    pub const RESOURCES: [&str; 3] = ["Generator", "Batteries", "Fuel supply"];
}

/// Preparatory tier: communication plan
pub mod communication_plan {
    /// Action text
    pub const ACTION: &str = "Create communication plan";
    /// Priority
    pub const PRIORITY: u8 = 3;
    /// Timeline
    pub const TIMELINE: &str = "Within 72 hours";
    /// Resources to gather
    pub const RESOURCES: [&str; 3] = [
        "Emergency contacts",
        "Meeting locations",
        "Communication devices",
    ];
}
