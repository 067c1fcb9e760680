use crate::context::OpsContext;
use crate::model::{
    Alert, InventoryItem, Location, LocationKind, RiskLevel, Scenario, ScenarioResults, Severity,
    Shipment, ShipmentStatus, Trend, User,
};
use crate::state::SeedData;
use chrono::{TimeZone, Utc};
use rust_decimal_macros::dec;
use serde_json::json;
use std::collections::BTreeMap;

/// The demo dataset the dashboard boots with. Ids and values are fixed so the
/// seeded state is recognizable across runs; timestamps that mean "now" come
/// from the context.
pub fn demo(ctx: &OpsContext) -> SeedData {
    let now = ctx.time.now();

    let shipments = vec![
        Shipment {
            id: "SH001".to_string(),
            origin: Location {
                lat: 40.7128,
                lng: -74.0060,
                name: "New York Warehouse".to_string(),
                kind: LocationKind::Warehouse,
            },
            destination: Location {
                lat: 34.0522,
                lng: -118.2437,
                name: "Los Angeles DC".to_string(),
                kind: LocationKind::Distribution,
            },
            status: ShipmentStatus::InTransit,
            cargo: "Electronics Components".to_string(),
            estimated_arrival: Utc.with_ymd_and_hms(2025, 1, 16, 14, 30, 0).unwrap(),
            current_location: Some(Location {
                lat: 39.9526,
                lng: -75.1652,
                name: "Philadelphia".to_string(),
                kind: LocationKind::Distribution,
            }),
            value: dec!(125000),
        },
        Shipment {
            id: "SH002".to_string(),
            origin: Location {
                lat: 41.8781,
                lng: -87.6298,
                name: "Chicago Hub".to_string(),
                kind: LocationKind::Warehouse,
            },
            destination: Location {
                lat: 32.7767,
                lng: -96.7970,
                name: "Dallas Customer".to_string(),
                kind: LocationKind::Customer,
            },
            status: ShipmentStatus::Delayed,
            cargo: "Medical Supplies".to_string(),
            estimated_arrival: Utc.with_ymd_and_hms(2025, 1, 17, 9, 15, 0).unwrap(),
            current_location: None,
            value: dec!(89000),
        },
    ];

    let inventory = vec![
        InventoryItem {
            id: "INV001".to_string(),
            name: "Semiconductor Chips".to_string(),
            location: "New York Warehouse".to_string(),
            current_stock: 2400,
            min_threshold: 1000,
            max_capacity: 5000,
            category: "Electronics".to_string(),
            last_updated: now,
            trend: Trend::Down,
        },
        InventoryItem {
            id: "INV002".to_string(),
            name: "Medical Devices".to_string(),
            location: "Chicago Hub".to_string(),
            current_stock: 450,
            min_threshold: 500,
            max_capacity: 2000,
            category: "Healthcare".to_string(),
            last_updated: now,
            trend: Trend::Up,
        },
    ];

    let alerts = vec![
        Alert {
            id: "AL001".to_string(),
            severity: Severity::Warning,
            message: "Low inventory threshold reached for Medical Devices".to_string(),
            timestamp: now,
            location: Some("Chicago Hub".to_string()),
            resolved: false,
        },
        Alert {
            id: "AL002".to_string(),
            severity: Severity::Critical,
            message: "Shipment SH002 delayed due to weather conditions".to_string(),
            timestamp: now,
            location: Some("Dallas".to_string()),
            resolved: false,
        },
    ];

    let current_user = User {
        id: "user-1".to_string(),
        name: "Supply Chain Manager".to_string(),
        avatar: "👨‍💼".to_string(),
        color: "#0EA5E9".to_string(),
        active: true,
        cursor: None,
    };

    let users = vec![
        User {
            id: "user-2".to_string(),
            name: "Logistics Coordinator".to_string(),
            avatar: "👩‍💻".to_string(),
            color: "#10B981".to_string(),
            active: true,
            cursor: None,
        },
        User {
            id: "user-3".to_string(),
            name: "Operations Director".to_string(),
            avatar: "👨‍🏭".to_string(),
            color: "#F59E0B".to_string(),
            active: false,
            cursor: None,
        },
    ];

    let mut parameters = BTreeMap::new();
    parameters.insert("weatherSeverity".to_string(), json!("high"));
    parameters.insert("affectedRegions".to_string(), json!(["northeast", "midwest"]));
    parameters.insert("duration".to_string(), json!("72 hours"));

    let scenarios = vec![Scenario {
        id: "SC001".to_string(),
        name: "Winter Storm Impact Analysis".to_string(),
        description: "Analyzing supply chain disruption during severe weather".to_string(),
        parameters,
        results: ScenarioResults {
            cost_impact: dec!(-125000),
            time_impact: 48,
            risk_level: RiskLevel::High,
        },
        collaborators: users.clone(),
        last_modified: now,
    }];

    SeedData {
        shipments,
        inventory,
        alerts,
        users,
        current_user: Some(current_user),
        scenarios,
    }
}
