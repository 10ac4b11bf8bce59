use anyhow::Result;
use filetime::FileTime;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use SlotStore::{Location, SaveRecord, StoreConfig};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

fn unique_root(prefix: &str) -> PathBuf {
    let pid = std::process::id();
    let t = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    let base = std::env::temp_dir();
    base.join(format!("slotstore-scan-{prefix}-{pid}-{t}-{id}"))
}

type Events = Arc<Mutex<Vec<String>>>;

fn open_with_events(root: &PathBuf) -> Result<(Location, Events)> {
    let events: Events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    let loc = Location::builder(root)
        .config(StoreConfig::default().with_fsync(false))
        .listener(move |slot: &str| sink.lock().unwrap().push(slot.to_string()))
        .open()?;
    Ok((loc, events))
}

fn drain(events: &Events) -> Vec<String> {
    let mut v = std::mem::take(&mut *events.lock().unwrap());
    v.sort();
    v
}

#[test]
fn scan_notifies_once_per_change() -> Result<()> {
    let root = unique_root("once");
    let (loc, events) = open_with_events(&root)?;
    assert!(drain(&events).is_empty(), "empty dir: no notifications");

    // создание
    loc.save("a", &SaveRecord::new(b"1".to_vec()))?;
    assert_eq!(drain(&events), vec!["a"]);

    // повторный scan без изменений — тишина
    loc.scan();
    loc.scan();
    assert!(drain(&events).is_empty());

    // изменение mtime при тех же байтах
    let file = loc.filename("a");
    filetime::set_file_mtime(&file, FileTime::from_unix_time(1_000_000, 0))?;
    loc.scan();
    assert_eq!(drain(&events), vec!["a"]);
    assert_eq!(
        loc.mtime("a"),
        Some(UNIX_EPOCH + std::time::Duration::from_secs(1_000_000))
    );
    loc.scan();
    assert!(drain(&events).is_empty());

    // внешний файл появился
    let bytes = SaveRecord::new(b"ext".to_vec()).to_archive_bytes()?;
    fs::write(root.join("b-LT1.save"), &bytes)?;
    loc.scan();
    assert_eq!(drain(&events), vec!["b"]);
    assert_eq!(loc.load("b")?, b"ext".to_vec());

    // удаление
    loc.unlink("a")?;
    assert_eq!(drain(&events), vec!["a"]);
    assert!(loc.mtime("a").is_none());

    // внешнее удаление
    fs::remove_file(root.join("b-LT1.save"))?;
    loc.scan();
    assert_eq!(drain(&events), vec!["b"]);
    assert!(loc.list().is_empty());

    let _ = fs::remove_dir_all(&root);
    Ok(())
}

#[test]
fn scan_reports_existing_slots_on_open() -> Result<()> {
    let root = unique_root("open");
    fs::create_dir_all(&root)?;
    let bytes = SaveRecord::new(b"x".to_vec()).to_archive_bytes()?;
    fs::write(root.join("s1-LT1.save"), &bytes)?;
    fs::write(root.join("s2-LT1.save"), &bytes)?;

    let (loc, events) = open_with_events(&root)?;
    assert_eq!(drain(&events), vec!["s1", "s2"]);

    let mut names = loc.list();
    names.sort();
    assert_eq!(names, vec!["s1", "s2"]);

    let _ = fs::remove_dir_all(&root);
    Ok(())
}

#[test]
fn scan_ignores_directories_and_non_slots() -> Result<()> {
    let root = unique_root("filter");
    let (loc, events) = open_with_events(&root)?;

    fs::create_dir_all(root.join("dir-LT1.save"))?;
    fs::write(root.join("notes.txt"), b"hi")?;
    fs::write(root.join("persistent"), b"not zlib")?;
    loc.scan();

    assert!(loc.list().is_empty());
    assert!(drain(&events).is_empty());

    let _ = fs::remove_dir_all(&root);
    Ok(())
}

#[test]
fn listener_sees_new_state_and_can_reenter() -> Result<()> {
    let root = unique_root("reenter");
    let seen: Arc<Mutex<Vec<(String, bool)>>> = Arc::new(Mutex::new(Vec::new()));
    let slot_loc: Arc<Mutex<Option<Arc<Location>>>> = Arc::new(Mutex::new(None));

    let sink = seen.clone();
    let back = slot_loc.clone();
    let loc = Arc::new(
        Location::builder(&root)
            .config(StoreConfig::default().with_fsync(false))
            .listener(move |slot: &str| {
                // из колбэка зовём обратно в store (тот же поток, reentrant lock)
                let present = back
                    .lock()
                    .unwrap()
                    .as_ref()
                    .map(|l| l.mtime(slot).is_some() && l.json(slot).is_some())
                    .unwrap_or(false);
                sink.lock().unwrap().push((slot.to_string(), present));
            })
            .open()?,
    );
    *slot_loc.lock().unwrap() = Some(loc.clone());

    loc.save("q", &SaveRecord::new(b"v".to_vec()))?;
    loc.unlink("q")?;

    let got = seen.lock().unwrap().clone();
    assert_eq!(
        got,
        vec![("q".to_string(), true), ("q".to_string(), false)]
    );

    // разорвать цикл Arc
    *slot_loc.lock().unwrap() = None;
    let _ = fs::remove_dir_all(&root);
    Ok(())
}

#[test]
fn shared_listener_across_locations() -> Result<()> {
    let a = unique_root("shared-a");
    let b = unique_root("shared-b");

    let events: Events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    let listener: SlotStore::listener::SharedListener =
        Arc::new(move |slot: &str| sink.lock().unwrap().push(slot.to_string()));

    let la = Location::builder(&a)
        .config(StoreConfig::default().with_fsync(false))
        .shared_listener(listener.clone())
        .open()?;
    let lb = Location::builder(&b)
        .config(StoreConfig::default().with_fsync(false))
        .shared_listener(listener)
        .open()?;

    la.save("from-a", &SaveRecord::new(b"1".to_vec()))?;
    lb.save("from-b", &SaveRecord::new(b"2".to_vec()))?;
    assert_eq!(drain(&events), vec!["from-a", "from-b"]);

    let _ = fs::remove_dir_all(&a);
    let _ = fs::remove_dir_all(&b);
    Ok(())
}
