//! Общие константы: имена файлов каталога сохранений и членов архива слота.

// -------- Directory layout --------
pub const DEFAULT_SLOT_SUFFIX: &str = "-LT1.save";
pub const DEFAULT_PERSISTENT_FILE: &str = "persistent";
// Пробный файл для проверки записи в каталог (open()).
pub const WRITE_PROBE_FILE: &str = ".slotstore-probe";
pub const TMP_EXT: &str = ".tmp";

// -------- Archive members --------
pub const MEMBER_LOG: &str = "log";
pub const MEMBER_JSON: &str = "json";
pub const MEMBER_EXTRA_INFO: &str = "extra_info";
pub const MEMBER_SCREENSHOT_TGA: &str = "screenshot.tga";
pub const MEMBER_SCREENSHOT_PNG: &str = "screenshot.png";

// Порядок проб скриншота: tga раньше png.
pub const SCREENSHOT_MEMBERS: [&str; 2] = [MEMBER_SCREENSHOT_TGA, MEMBER_SCREENSHOT_PNG];

// Ключ, под которым legacy extra_info отдаётся как JSON.
pub const LEGACY_SAVE_NAME_KEY: &str = "_save_name";

// -------- Defaults --------
pub const DEFAULT_STALE_TMP_SECS: u64 = 3600;
