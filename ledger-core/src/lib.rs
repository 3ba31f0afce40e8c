//! ledger-core: canonical transaction model, record normalization and the in-memory ledger

pub mod categories;
pub mod ids;
pub mod ledger;
pub mod normalize;
pub mod raw;
pub mod time;
pub mod transaction;

pub use categories::CategoryRegistry;
pub use ids::{IdSource, SequentialIds, UuidIds};
pub use ledger::Ledger;
pub use normalize::{Normalizer, coerce_amount, coerce_type};
pub use raw::{Field, RawInput, FIELD_ALIASES};
pub use time::{Clock, FixedClock, SystemClock, recover_date};
pub use transaction::{
    Transaction, TransactionDraft, TxType, EXPENSE_WORD, FALLBACK_CATEGORY, INCOME_WORD,
};
