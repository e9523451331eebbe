//! Demo data for local runs.

use crate::error::AppResult;
use crate::models::{Flat, Landlord};

use super::FlatRepository;

pub const DEMO_LANDLORD_ID: &str = "ID_LANDLORD_1";
pub const DEMO_FLAT_IDS: [&str; 2] = ["ID_FLAT_1", "ID_FLAT_2"];

/// Inserts one landlord owning two London flats.
///
/// Existing flats with the same ids are replaced.
pub async fn seed_demo_flats(flats: &dyn FlatRepository) -> AppResult<()> {
    let landlord = Landlord::new(DEMO_LANDLORD_ID, "Murad", "Imanbayli");

    flats
        .save(Flat::new(
            DEMO_FLAT_IDS[0],
            "Cozy apartment",
            "London",
            landlord.clone(),
        ))
        .await?;
    flats
        .save(Flat::new(
            DEMO_FLAT_IDS[1],
            "Super cheap flat in center",
            "London",
            landlord,
        ))
        .await?;

    tracing::info!(flats = DEMO_FLAT_IDS.len(), landlord_id = DEMO_LANDLORD_ID, "Demo flats seeded");
    Ok(())
}
