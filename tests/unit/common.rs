//! Shared fixtures.

use chrono::NaiveDate;
use option_income::provider::StaticProvider;

pub const FIXTURE: &str = r#"{
    "aapl": {
        "last_price": 100.0,
        "chains": {
            "2026-11-17": {
                "calls": [
                    {"strike": 95.0, "bid": 7.5},
                    {"strike": 105.0, "bid": 2.0, "ask": 2.2},
                    {"strike": 110.0, "bid": 0.0, "last_price": 1.0},
                    {"strike": 120.0},
                    {"bid": 1.0}
                ],
                "puts": [
                    {"strike": 90.0, "bid": 1.0},
                    {"strike": 95.0, "bid": 1.5},
                    {"strike": 105.0, "bid": 6.0}
                ]
            },
            "2026-12-18": {
                "calls": [{"strike": 110.0, "bid": 3.0}],
                "puts": []
            }
        }
    },
    "NOPRICE": {
        "chains": {
            "2026-11-17": {"calls": [{"strike": 10.0, "bid": 1.0}], "puts": []}
        }
    }
}"#;

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
}

pub fn provider() -> StaticProvider {
    StaticProvider::from_json(FIXTURE).unwrap()
}
