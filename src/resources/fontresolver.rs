//! System font lookup.
//!
//! Maps a human font family name ("Consolas", "DejaVu Sans") to a font file on
//! the host. Two strategies exist:
//!
//! - [`FontPlatform::Registry`]: the Windows font registry is enumerated and
//!   the first value whose name starts with the requested family
//!   (case-insensitive) wins.
//! - [`FontPlatform::FontConfig`]: `fc-list` output is parsed into a
//!   case-insensitive name to path table, keeping the first path seen for each
//!   name, and the family is looked up exactly.
//!
//! The listing is produced by a [`FontSource`] and turned into a table once per resolver;
//! the parsed table sits in a [`OnceLock`]. A source that fails to run simply
//! yields an empty table so every lookup reports "not found".

use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::{LazyLock, OnceLock};

use log::{debug, warn};
use regex::Regex;
use rustc_hash::FxHashMap;

/// Key under `HKEY_LOCAL_MACHINE` listing installed fonts on Windows.
#[cfg(windows)]
const FONTS_REGISTRY_SUBKEY: &str = r"SOFTWARE\Microsoft\Windows NT\CurrentVersion\Fonts";

static FC_LIST_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^(?P<path>.+?):\s*(?P<name>.+?):style=").unwrap()
});

/// Font discovery strategy of the host platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontPlatform {
    Registry,
    FontConfig,
    Unsupported,
}

impl FontPlatform {
    /// Strategy for the compile target.
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            FontPlatform::Registry
        } else if cfg!(target_os = "linux") {
            FontPlatform::FontConfig
        } else {
            FontPlatform::Unsupported
        }
    }
}

/// Installed fonts as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontListing {
    /// Raw `fc-list` output.
    FcList(String),
    /// Font registry values as `(display name, file)`, in enumeration order.
    Registry(Vec<(String, String)>),
}

/// Produces the font listing for a platform.
pub trait FontSource {
    /// `None` when the listing could not be produced.
    fn listing(&self, platform: FontPlatform) -> Option<FontListing>;
}

/// Queries the operating system: `fc-list` on FontConfig hosts, the font
/// registry key on Windows.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemFontSource;

impl FontSource for SystemFontSource {
    fn listing(&self, platform: FontPlatform) -> Option<FontListing> {
        match platform {
            FontPlatform::FontConfig => fc_list().map(FontListing::FcList),
            FontPlatform::Registry => registry_fonts().map(FontListing::Registry),
            FontPlatform::Unsupported => None,
        }
    }
}

fn fc_list() -> Option<String> {
    match Command::new("fc-list").output() {
        Ok(output) if output.status.success() => {
            Some(String::from_utf8_lossy(&output.stdout).into_owned())
        }
        Ok(output) => {
            warn!("fc-list exited with {}; system fonts unavailable", output.status);
            None
        }
        Err(e) => {
            warn!("Failed to run fc-list: {}; system fonts unavailable", e);
            None
        }
    }
}

/// Enumerate the string values of the fonts registry key.
///
/// Values that are not strings are skipped.
#[cfg(windows)]
fn registry_fonts() -> Option<Vec<(String, String)>> {
    use winreg::RegKey;
    use winreg::enums::{HKEY_LOCAL_MACHINE, KEY_READ};
    use winreg::types::FromRegValue;

    let hklm = RegKey::predef(HKEY_LOCAL_MACHINE);
    let key = match hklm.open_subkey_with_flags(FONTS_REGISTRY_SUBKEY, KEY_READ) {
        Ok(key) => key,
        Err(e) => {
            warn!(
                "Failed to open the font registry key: {}; system fonts unavailable",
                e
            );
            return None;
        }
    };

    let mut fonts = Vec::new();
    for value in key.enum_values() {
        let (name, data) = match value {
            Ok(value) => value,
            Err(e) => {
                debug!("Skipping unreadable font registry value: {}", e);
                continue;
            }
        };
        match String::from_reg_value(&data) {
            Ok(file) => fonts.push((name, file)),
            Err(_) => debug!("Skipping non-string font registry value '{}'", name),
        }
    }
    Some(fonts)
}

#[cfg(not(windows))]
fn registry_fonts() -> Option<Vec<(String, String)>> {
    warn!("Font registry is only available on Windows; system fonts unavailable");
    None
}

/// Parsed font listing, in enumeration order.
#[derive(Debug, Default, Clone)]
pub struct FontTable {
    entries: Vec<(String, PathBuf)>,
    by_name: FxHashMap<String, usize>,
}

impl FontTable {
    /// Append an entry unless a case-insensitively equal name already exists.
    pub fn insert_first(&mut self, name: &str, path: PathBuf) -> bool {
        let key = name.to_lowercase();
        if self.by_name.contains_key(&key) {
            return false;
        }
        self.by_name.insert(key, self.entries.len());
        self.entries.push((name.to_string(), path));
        true
    }

    /// Exact, case-insensitive lookup.
    pub fn get(&self, name: &str) -> Option<&Path> {
        self.by_name
            .get(&name.to_lowercase())
            .map(|&i| self.entries[i].1.as_path())
    }

    /// First entry, in enumeration order, whose name starts with `prefix`
    /// (case-insensitive).
    pub fn find_prefix(&self, prefix: &str) -> Option<&Path> {
        let prefix = prefix.to_lowercase();
        self.entries
            .iter()
            .find(|(name, _)| name.to_lowercase().starts_with(&prefix))
            .map(|(_, path)| path.as_path())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parse `fc-list` output (`path: family:style=...` per line).
///
/// Later lines repeating a family name are dropped.
pub fn parse_fc_list(output: &str) -> FontTable {
    let mut table = FontTable::default();
    for caps in FC_LIST_REGEX.captures_iter(output) {
        let path = caps["path"].trim();
        let name = caps["name"].trim();
        table.insert_first(name, PathBuf::from(path));
    }
    table
}

/// Build a table from font registry values.
///
/// Value data that is not an absolute path is relative to `fonts_dir`.
pub fn registry_table<I, N, F>(values: I, fonts_dir: &Path) -> FontTable
where
    I: IntoIterator<Item = (N, F)>,
    N: AsRef<str>,
    F: AsRef<str>,
{
    let mut table = FontTable::default();
    for (name, file) in values {
        let (name, file) = (name.as_ref(), file.as_ref().trim());
        if file.is_empty() {
            continue;
        }
        let path = if is_absolute_windows_path(file) {
            PathBuf::from(file)
        } else {
            fonts_dir.join(file)
        };
        table.insert_first(name, path);
    }
    table
}

fn is_absolute_windows_path(file: &str) -> bool {
    let bytes = file.as_bytes();
    file.starts_with('\\')
        || file.starts_with('/')
        || (bytes.len() > 2 && bytes[1] == b':' && (bytes[2] == b'\\' || bytes[2] == b'/'))
}

/// System font folder on Windows.
fn windows_fonts_dir() -> PathBuf {
    let windir = std::env::var_os("WINDIR").unwrap_or_else(|| "C:\\Windows".into());
    PathBuf::from(windir).join("Fonts")
}

/// Lazily-initialized family name to font file lookup.
pub struct FontResolver {
    platform: FontPlatform,
    source: Box<dyn FontSource>,
    table: OnceLock<FontTable>,
}

impl FontResolver {
    /// Resolver for the current platform backed by the OS utilities.
    pub fn system() -> Self {
        Self::new(FontPlatform::current(), SystemFontSource)
    }

    pub fn new(platform: FontPlatform, source: impl FontSource + 'static) -> Self {
        Self {
            platform,
            source: Box::new(source),
            table: OnceLock::new(),
        }
    }

    pub fn platform(&self) -> FontPlatform {
        self.platform
    }

    /// Path of the font file for `family`, if one is installed.
    pub fn resolve(&self, family: &str) -> Option<PathBuf> {
        let found = match self.platform {
            FontPlatform::Unsupported => None,
            FontPlatform::FontConfig => self.table().get(family),
            FontPlatform::Registry => self.table().find_prefix(family),
        };
        found.map(Path::to_path_buf)
    }

    /// Whether the listing has been parsed already.
    pub fn is_initialized(&self) -> bool {
        self.table.get().is_some()
    }

    fn table(&self) -> &FontTable {
        self.table.get_or_init(|| {
            let table = match self.source.listing(self.platform) {
                Some(FontListing::FcList(text)) => parse_fc_list(&text),
                Some(FontListing::Registry(values)) => {
                    registry_table(values, &windows_fonts_dir())
                }
                None => FontTable::default(),
            };
            debug!(
                "Font table for {:?} built with {} families",
                self.platform,
                table.len()
            );
            table
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    const FC_LIST: &str = "\
/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf: DejaVu Sans:style=Book
/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf: DejaVu Sans:style=Bold
/usr/share/fonts/TTF/consola.ttf: Consolas:style=Regular
/usr/share/fonts/noto/NotoSans-Regular.ttf: Noto Sans,Noto Sans Regular:style=Regular
";

    fn registry_values() -> Vec<(&'static str, &'static str)> {
        vec![
            ("Arial (TrueType)", "arial.ttf"),
            ("Arial Bold (TrueType)", "arialbd.ttf"),
            ("Consolas (TrueType)", "consola.ttf"),
            (
                "Custom Font (TrueType)",
                "C:\\Users\\me\\AppData\\Local\\Microsoft\\Windows\\Fonts\\custom.ttf",
            ),
        ]
    }

    struct CountingSource {
        text: Option<&'static str>,
        calls: Rc<Cell<u32>>,
    }

    impl FontSource for CountingSource {
        fn listing(&self, _platform: FontPlatform) -> Option<FontListing> {
            self.calls.set(self.calls.get() + 1);
            self.text.map(|text| FontListing::FcList(text.to_string()))
        }
    }

    fn counting(text: Option<&'static str>) -> (CountingSource, Rc<Cell<u32>>) {
        let calls = Rc::new(Cell::new(0));
        (
            CountingSource {
                text,
                calls: calls.clone(),
            },
            calls,
        )
    }

    #[test]
    fn fc_list_first_path_wins() {
        let table = parse_fc_list(FC_LIST);
        assert_eq!(table.len(), 3);
        assert_eq!(
            table.get("DejaVu Sans"),
            Some(Path::new("/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf"))
        );
    }

    #[test]
    fn fc_list_lookup_is_case_insensitive_and_exact() {
        let table = parse_fc_list(FC_LIST);
        assert_eq!(
            table.get("consolas"),
            Some(Path::new("/usr/share/fonts/TTF/consola.ttf"))
        );
        assert!(table.get("Consol").is_none());
        // Comma-separated alias lists are kept verbatim as the family key.
        assert!(table.get("Noto Sans,Noto Sans Regular").is_some());
    }

    #[test]
    fn fc_list_ignores_lines_without_style() {
        let table = parse_fc_list("garbage line\n/x/y.ttf: Foo\n");
        assert!(table.is_empty());
    }

    #[test]
    fn registry_prefix_match_in_enumeration_order() {
        let table = registry_table(registry_values(), Path::new("C:\\Windows\\Fonts"));
        assert_eq!(table.len(), 4);
        // "Arial" matches both entries; the first enumerated one wins.
        let fonts_dir = Path::new("C:\\Windows\\Fonts");
        assert_eq!(
            table.find_prefix("arial").map(Path::to_path_buf),
            Some(fonts_dir.join("arial.ttf"))
        );
        assert_eq!(
            table.find_prefix("Arial Bold").map(Path::to_path_buf),
            Some(fonts_dir.join("arialbd.ttf"))
        );
        assert!(table.find_prefix("Comic").is_none());
    }

    #[test]
    fn registry_absolute_paths_are_kept() {
        let table = registry_table(registry_values(), Path::new("C:\\Windows\\Fonts"));
        assert_eq!(
            table.find_prefix("Custom"),
            Some(Path::new(
                "C:\\Users\\me\\AppData\\Local\\Microsoft\\Windows\\Fonts\\custom.ttf"
            ))
        );
    }

    #[test]
    fn registry_names_are_taken_verbatim() {
        let values = vec![
            ("ＭＳ ゴシック & ＭＳ Ｐゴシック (TrueType)".to_string(), "msgothic.ttc".to_string()),
            ("Segoe UI  Variable (TrueType)".to_string(), " SegUIVar.ttf ".to_string()),
            ("Broken (TrueType)".to_string(), String::new()),
        ];
        let fonts_dir = Path::new("C:\\Windows\\Fonts");
        let table = registry_table(values, fonts_dir);

        assert_eq!(table.len(), 2);
        assert_eq!(
            table.find_prefix("ｍｓ ゴシック").map(Path::to_path_buf),
            Some(fonts_dir.join("msgothic.ttc"))
        );
        assert_eq!(
            table.find_prefix("Segoe UI  Variable").map(Path::to_path_buf),
            Some(fonts_dir.join("SegUIVar.ttf"))
        );
        assert!(table.find_prefix("Broken").is_none());
    }

    #[test]
    fn registry_listing_feeds_prefix_lookup() {
        struct Registry;
        impl FontSource for Registry {
            fn listing(&self, platform: FontPlatform) -> Option<FontListing> {
                assert_eq!(platform, FontPlatform::Registry);
                let values = registry_values()
                    .into_iter()
                    .map(|(name, file)| (name.to_string(), file.to_string()))
                    .collect();
                Some(FontListing::Registry(values))
            }
        }

        let resolver = FontResolver::new(FontPlatform::Registry, Registry);
        let consolas = resolver.resolve("consolas").unwrap();
        assert!(consolas.ends_with("consola.ttf"));
        assert!(resolver.resolve("Comic").is_none());
    }

    #[test]
    fn table_is_built_once() {
        let (source, calls) = counting(Some(FC_LIST));
        let resolver = FontResolver::new(FontPlatform::FontConfig, source);
        assert!(!resolver.is_initialized());

        assert!(resolver.resolve("Consolas").is_some());
        assert!(resolver.resolve("Missing Family").is_none());
        assert!(resolver.resolve("dejavu sans").is_some());

        assert!(resolver.is_initialized());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn failed_listing_means_not_found() {
        let (source, calls) = counting(None);
        let resolver = FontResolver::new(FontPlatform::FontConfig, source);
        assert!(resolver.resolve("Consolas").is_none());
        assert!(resolver.resolve("DejaVu Sans").is_none());
        // The failure is not retried.
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn unsupported_platform_never_lists() {
        let (source, calls) = counting(Some(FC_LIST));
        let resolver = FontResolver::new(FontPlatform::Unsupported, source);
        assert!(resolver.resolve("Consolas").is_none());
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn system_source_unsupported_platform_is_none() {
        assert!(SystemFontSource.listing(FontPlatform::Unsupported).is_none());
    }
}
