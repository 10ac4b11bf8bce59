#![allow(non_snake_case)]

// Базовые модули
pub mod consts;
pub mod config;
pub mod metrics;
pub mod lock;

// Формат слота: tar-архив (log / json / extra_info / screenshot)
pub mod archive; // src/archive/{mod,reader,writer}.rs
pub mod metadata;
pub mod screenshot;

// Состояние каталога
pub mod index;
pub mod persistent;
pub mod listener;

// Высокоуровневый API
pub mod location; // src/location/{mod,open,scan,slots,read,persistent}.rs

// Утилиты (tmp-имена, атомарная запись, mtime)
pub mod util;

// Удобные реэкспорты
pub use archive::{ArchiveReader, SaveRecord, ScreenshotFormat, ScreenshotImage};
pub use config::StoreConfig;
pub use index::{ChangeKind, SlotChange, SlotIndex};
pub use listener::{ChangeListener, NoopListener, PlainNames, SlotNameEncoder};
pub use location::{Location, LocationBuilder};
pub use lock::DiskLock;
pub use metadata::SlotMetadata;
pub use persistent::{PersistentCache, PersistentLoader, ZlibJson};
pub use screenshot::ScreenshotRef;
