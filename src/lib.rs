pub mod core;
pub mod analysis;
pub mod index;
pub mod store;
pub mod queue;

pub use crate::core::config::{QueueConfig, StoreConfig};
pub use crate::core::error::{Error, ErrorKind, Result};
pub use crate::queue::emergency::{status_feed, EmergencyQueue};
pub use crate::queue::heap::PriorityQueue;
pub use crate::queue::order::{Ascending, Descending, FnOrder, PriorityOrder};
pub use crate::store::citizen::{CitizenPatch, CitizenRegistry};
pub use crate::store::criminal::{CriminalDatabase, CriminalPatch};
pub use crate::store::record::{Attribute, Record};
pub use crate::store::registry::IndexedStore;

/*
┌──────────────────────────────────────────────────────────────────────────────┐
│                          INCIDEX STRUCT ARCHITECTURE                         │
└──────────────────────────────────────────────────────────────────────────────┘

┌──────────────────────────────── STORE LAYER ─────────────────────────────────┐
│                                                                              │
│  struct IndexedStore<R: Record>                                              │
│  ┌────────────────────────────────────────────────────────────────────────┐  │
│  │ config: StoreConfig                  // substring length, cache size   │  │
│  │ records: HashMap<Ordinal, R>         // primary storage                │  │
│  │ ids: HashMap<R::Id, Ordinal>         // O(1) id lookup                 │  │
│  │ live: RoaringBitmap                  // insertion-ordered enumeration  │  │
│  │ unique: UniqueIndex                  // unique key -> ordinal          │  │
│  │ names: SubstringIndex                // name substring -> ordinals     │  │
│  │ attributes: AttributeIndex           // field -> value -> ordinals     │  │
│  │ name_cache: NameQueryCache           // LRU of name query results      │  │
│  └────────────────────────────────────────────────────────────────────────┘  │
│                                                                              │
│  CitizenRegistry  = IndexedStore<Citizen>    unique: email                   │
│  CriminalDatabase = IndexedStore<Criminal>   unique: email                   │
│                                              attributes: status,             │
│                                                          threat_level        │
└──────────────────────────────────────────────────────────────────────────────┘

┌──────────────────────────────── QUEUE LAYER ─────────────────────────────────┐
│                                                                              │
│  struct PriorityQueue<T, P, O: PriorityOrder<P> = Ascending>                 │
│  ┌────────────────────────────────────────────────────────────────────────┐  │
│  │ heap: Vec<Entry { item: T, priority: P, seq: u64 }>                    │  │
│  │ order: O                             // Ascending/Descending/FnOrder   │  │
│  │ stable: bool                         // FIFO among equal priorities    │  │
│  └────────────────────────────────────────────────────────────────────────┘  │
│                                                                              │
│  EmergencyQueue = PriorityQueue<EmergencyRequest, u8, Ascending>             │
│  status_feed()  : StatusUpdate by (priority, newest first)                   │
└──────────────────────────────────────────────────────────────────────────────┘

┌──────────────────────────────── RELATIONSHIPS ───────────────────────────────┐
│                                                                              │
│  IndexedStore ──owns──> SubstringIndex ──uses──> Analyzer                    │
│       │                      │                      │                        │
│       │                      │                      ├──> KeywordTokenizer    │
│       │                      │                      ├──> LowercaseFilter     │
│       │                      │                      └──> NGramFilter         │
│       │                      └──stores──> PostingMap<String> ──> RoaringBitmap│
│       ├──owns──> AttributeIndex ──stores──> PostingMap<String>               │
│       ├──owns──> UniqueIndex                                                 │
│       └──owns──> NameQueryCache ──stores──> RoaringBitmap (per query)        │
│                                                                              │
│  EmergencyQueue ──escalate/deescalate──> PriorityQueue::change_priority_with │
│                                                                              │
└──────────────────────────────────────────────────────────────────────────────┘
*/
