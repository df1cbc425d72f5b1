pub mod catalog;
pub mod core;
pub mod logging;
pub mod persistence;
pub mod progress;
pub mod quota;
pub mod review;
pub mod scheduler;
pub mod session;
pub mod settings;
pub mod terminal;

pub use catalog::Catalog;
pub use crate::core::{
    Clock,
    Example,
    ItemProgress,
    ReviewOutcome,
    VocabItem,
    VokabelError,
};
pub use persistence::{
    FileKeyValueStore,
    KeyValueStore,
    MemoryKeyValueStore,
};
pub use progress::ProgressStore;
pub use quota::{
    render_quota,
    QuotaDisplay,
    QuotaTarget,
};
pub use review::record_review;
pub use scheduler::{
    pick_example,
    select_next,
};
pub use session::{
    DrillSession,
    SessionEvent,
};
pub use settings::Settings;
