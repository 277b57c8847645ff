//! Firande när en ny vecka nås. Senast firade vecka sparas lokalt.

use tracing::info;

use crate::pregnancy::{should_celebrate, Celebration, GestationalAge};
use crate::store::LocalStore;
use crate::utils::AppResult;

/// Kontrollera om dagens läge ska firas och kom ihåg veckan
pub fn check_milestone(store: &LocalStore, ga: &GestationalAge) -> AppResult<Option<Celebration>> {
    let previous = store.get_last_completed_week()?;
    let celebration = should_celebrate(ga.weeks, ga.days, previous);

    if previous != Some(ga.weeks) {
        store.set_last_completed_week(ga.weeks)?;
    }

    if let Some(c) = &celebration {
        info!("Milstolpe vecka {}: {:?}", ga.weeks, c.level);
    }
    Ok(celebration)
}
