pub mod clock;
pub mod errors;
pub mod models;

pub use clock::{
    date_key,
    Clock,
    FixedClock,
    LocalClock,
};
pub use errors::VokabelError;
pub use models::{
    Example,
    ItemProgress,
    ItemState,
    ReviewOutcome,
    VocabItem,
};
