//! Synthetic listing generator for local and load-test environments.

use crate::snapshot_cache::SnapshotCache;
use propcache_core::{ListingDraft, Price, PropcacheResult};
use propcache_repository::ListingRepository;
use rand::seq::IndexedRandom;
use rand::Rng;
use std::sync::Arc;
use tracing::{info, warn};

const ADJECTIVES: &[&str] = &[
    "Cozy",
    "Spacious",
    "Modern",
    "Charming",
    "Elegant",
    "Sunny",
    "Quiet",
    "Renovated",
    "Premium",
    "Affordable",
    "Luxurious",
    "Stylish",
    "Comfortable",
    "Bright",
];

const PROPERTY_TYPES: &[&str] = &[
    "Apartment",
    "Studio",
    "Condo",
    "Loft",
    "Townhouse",
    "Bungalow",
    "Villa",
    "Cottage",
    "Duplex",
    "Penthouse",
];

const CITIES: &[&str] = &[
    "Accra",
    "Kumasi",
    "Tema",
    "Takoradi",
    "Cape Coast",
    "Tamale",
    "Ho",
    "Koforidua",
    "Sunyani",
    "Bolgatanga",
];

const DESCRIPTIONS: &[&str] = &[
    "Close to shops and public transport.",
    "Great neighborhood with parks nearby.",
    "Recently renovated with modern finishes.",
    "Perfect for families and professionals.",
    "Offers stunning city views.",
    "Walking distance to schools and markets.",
    "Secure compound with parking.",
    "Includes fitted kitchen and wardrobes.",
];

const MIN_PRICE_UNITS: u64 = 30_000;
const MAX_PRICE_UNITS: u64 = 1_000_000;

/// Outcome of a seeding run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedReport {
    /// Rows removed before seeding.
    pub flushed: Option<u64>,
    /// Rows created.
    pub created: u64,
}

/// Builds one random listing draft.
pub fn random_draft<R: Rng + ?Sized>(rng: &mut R) -> ListingDraft {
    let pick = |options: &'static [&'static str], rng: &mut R| -> &'static str {
        options.choose(rng).copied().unwrap_or_default()
    };

    let adjective = pick(ADJECTIVES, rng);
    let kind = pick(PROPERTY_TYPES, rng);
    let city = pick(CITIES, rng);
    let description = pick(DESCRIPTIONS, rng);
    let suffix: u16 = rng.random_range(1000..=9999);

    let units = rng.random_range(MIN_PRICE_UNITS..=MAX_PRICE_UNITS);
    let cents: u64 = rng.random_range(0..=99);

    ListingDraft::new(
        format!("{} {} in {} #{}", adjective, kind, city, suffix),
        description,
        Price::from_cents(units * 100 + cents),
        city,
    )
}

/// Writes synthetic listings through the record store.
///
/// Rows are created one at a time so every insert passes through the
/// store's observers. The snapshot is dropped once more at the end.
pub struct ListingSeeder {
    repository: Arc<dyn ListingRepository>,
    snapshot: Arc<SnapshotCache>,
}

impl ListingSeeder {
    /// Creates a seeder.
    #[must_use]
    pub fn new(repository: Arc<dyn ListingRepository>, snapshot: Arc<SnapshotCache>) -> Self {
        Self {
            repository,
            snapshot,
        }
    }

    /// Creates `count` random listings, optionally deleting every existing row first.
    pub async fn seed(&self, count: u64, flush: bool) -> PropcacheResult<SeedReport> {
        let flushed = if flush {
            let removed = self.repository.delete_all().await?;
            info!("Flushed {} existing listings", removed);
            Some(removed)
        } else {
            None
        };

        let drafts: Vec<ListingDraft> = {
            let mut rng = rand::rng();
            (0..count).map(|_| random_draft(&mut rng)).collect()
        };

        let mut created = 0;
        for draft in &drafts {
            self.repository.save(draft).await?;
            created += 1;
        }

        if let Err(e) = self.snapshot.invalidate().await {
            warn!("Failed to clear listing snapshot after seeding: {}", e);
        }

        info!("Seeded {} listings", created);
        Ok(SeedReport { flushed, created })
    }
}

impl std::fmt::Debug for ListingSeeder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListingSeeder").finish_non_exhaustive()
    }
}
