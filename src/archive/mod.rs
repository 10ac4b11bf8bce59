//! archive — контейнер слота (tar) и запись/чтение его членов.
//!
//! Состав архива слота:
//! - `log`            — непрозрачный блоб сохранения (обязателен для валидного слота);
//! - `json`           — структурированные метаданные (новый формат, UTF-8 JSON);
//! - `extra_info`     — legacy: одна строка с отображаемым именем;
//! - `screenshot.tga` | `screenshot.png` — необязательный скриншот (не более одного).
//!
//! Архив пишется целиком (SaveRecord::to_archive_bytes) и читается через
//! ArchiveReader, который при открытии индексирует имена членов.

pub mod reader;
pub mod writer;

pub use reader::ArchiveReader;
pub use writer::{SaveRecord, ScreenshotFormat, ScreenshotImage};
