//! Suspicion rules used to flag cleanup candidates.
//!
//! A [`RuleSet`] is an ordered, immutable list of named predicates. Each
//! predicate looks at a lightweight [`EntryView`] of one file; the labels of
//! every matching rule are returned in definition order. Labels are shown to
//! users verbatim, so existing rules are never reworded or reordered; new
//! rules are appended.

use std::borrow::Cow;
use std::path::Path;
use std::sync::Arc;

/// Files above this size that are also old are flagged.
pub const OLD_LARGE_MIN_SIZE: u64 = 500 * 1024 * 1024;

/// Age in days after which a large file counts as old.
pub const OLD_LARGE_MIN_AGE_DAYS: u64 = 365;

const INSTALLER_EXTENSIONS: &[&str] = &["dmg", "pkg", "zip", "rar"];
const CACHE_EXTENSIONS: &[&str] = &["log", "cache"];
const CACHES_SEGMENT: &str = "/Library/Caches/";
const DEV_BUILD_SEGMENTS: &[&str] = &["/DerivedData/", "/node_modules/", "/.gradle/"];
const IOS_BACKUP_SEGMENT: &str = "/MobileSync/Backup/";
const BREW_CACHE_SEGMENT: &str = "/Library/Caches/Homebrew/";
const DOCKER_VM_SEGMENT: &str = "/Containers/com.docker.docker/Data/vms/";
const BROWSER_CACHE_SEGMENTS: &[&str] = &[
    "/Library/Caches/Google/Chrome/",
    "/Library/Caches/com.apple.Safari/",
    "/Library/Caches/Microsoft Edge/",
    "/Library/Caches/Firefox/",
    "/Library/Caches/BraveSoftware/",
];

/// The attributes a rule may look at.
#[derive(Debug, Clone, Copy)]
pub struct EntryView<'a> {
    /// Base name.
    pub name: &'a str,
    /// Size in bytes.
    pub size: u64,
    /// Full path with `/` separators.
    pub path: &'a str,
    /// Whole days since last modification.
    pub age_days: u64,
}

/// Predicate signature for a rule.
pub type Predicate = fn(&EntryView<'_>) -> bool;

/// A single named classification rule.
#[derive(Clone, Copy)]
pub struct Rule {
    /// Stable identifier.
    pub id: &'static str,
    /// User-visible label.
    pub label: &'static str,
    /// Match predicate.
    pub predicate: Predicate,
}

impl Rule {
    /// Create a new rule.
    pub const fn new(id: &'static str, label: &'static str, predicate: Predicate) -> Self {
        Self {
            id,
            label,
            predicate,
        }
    }

    /// Check whether this rule matches an entry.
    pub fn matches(&self, entry: &EntryView<'_>) -> bool {
        (self.predicate)(entry)
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("id", &self.id)
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// The built-in rules, in display order.
pub const BUILTIN_RULES: &[Rule] = &[
    Rule::new("old-large", "Arquivos antigos e grandes", is_old_and_large),
    Rule::new("installer", "Instaladores e imagens de disco", is_installer),
    Rule::new("cache", "Caches e logs", is_cache),
    Rule::new("dev-builds", "Artefatos de build de desenvolvimento", is_dev_build),
    Rule::new("ios-backups", "Backups de dispositivos iOS", is_ios_backup),
    Rule::new("brew-cache", "Cache do Homebrew", is_brew_cache),
    Rule::new("docker", "Imagens de disco do Docker", is_docker_vm),
    Rule::new("browser-cache", "Cache de navegadores", is_browser_cache),
];

/// An ordered, immutable collection of rules.
///
/// Cloning is cheap; the rule list is shared.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Arc<[Rule]>,
}

impl RuleSet {
    /// Create a rule set from an explicit list.
    pub fn new(rules: impl Into<Arc<[Rule]>>) -> Self {
        Self {
            rules: rules.into(),
        }
    }

    /// Return a new set with `rule` appended after the existing ones.
    pub fn with_rule(&self, rule: Rule) -> Self {
        let mut rules = self.rules.to_vec();
        rules.push(rule);
        Self::new(rules)
    }

    /// Labels of every matching rule, in definition order.
    pub fn classify(&self, entry: &EntryView<'_>) -> Vec<String> {
        self.matching(entry)
            .map(|rule| rule.label.to_string())
            .collect()
    }

    /// Iterate over the rules that match an entry.
    pub fn matching<'s, 'e>(
        &'s self,
        entry: &'e EntryView<'e>,
    ) -> impl Iterator<Item = &'s Rule> {
        self.rules.iter().filter(move |rule| rule.matches(entry))
    }

    /// All rules, in definition order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Look up a rule by id.
    pub fn get(&self, id: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.id == id)
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the set has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::new(BUILTIN_RULES)
    }
}

/// Render a path with `/` separators for segment matching.
pub fn normalize_separators(path: &Path) -> Cow<'_, str> {
    let raw = path.to_string_lossy();
    if std::path::MAIN_SEPARATOR == '/' {
        raw
    } else {
        Cow::Owned(raw.replace(std::path::MAIN_SEPARATOR, "/"))
    }
}

/// Case-insensitive check of the text after the last `.` in `name`.
fn has_extension(name: &str, extensions: &[&str]) -> bool {
    name.rsplit_once('.')
        .is_some_and(|(_, ext)| extensions.iter().any(|e| ext.eq_ignore_ascii_case(e)))
}

fn contains_any(path: &str, segments: &[&str]) -> bool {
    segments.iter().any(|segment| path.contains(segment))
}

fn is_old_and_large(entry: &EntryView<'_>) -> bool {
    entry.size > OLD_LARGE_MIN_SIZE && entry.age_days > OLD_LARGE_MIN_AGE_DAYS
}

fn is_installer(entry: &EntryView<'_>) -> bool {
    has_extension(entry.name, INSTALLER_EXTENSIONS)
}

fn is_cache(entry: &EntryView<'_>) -> bool {
    has_extension(entry.name, CACHE_EXTENSIONS) || entry.path.contains(CACHES_SEGMENT)
}

fn is_dev_build(entry: &EntryView<'_>) -> bool {
    contains_any(entry.path, DEV_BUILD_SEGMENTS)
}

fn is_ios_backup(entry: &EntryView<'_>) -> bool {
    entry.path.contains(IOS_BACKUP_SEGMENT)
}

fn is_brew_cache(entry: &EntryView<'_>) -> bool {
    entry.path.contains(BREW_CACHE_SEGMENT)
}

fn is_docker_vm(entry: &EntryView<'_>) -> bool {
    entry.path.contains(DOCKER_VM_SEGMENT)
}

fn is_browser_cache(entry: &EntryView<'_>) -> bool {
    contains_any(entry.path, BROWSER_CACHE_SEGMENTS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view<'a>(name: &'a str, path: &'a str) -> EntryView<'a> {
        EntryView {
            name,
            size: 1024,
            path,
            age_days: 0,
        }
    }

    #[test]
    fn test_builtin_order() {
        let ids: Vec<_> = RuleSet::default().rules().iter().map(|r| r.id).collect();
        assert_eq!(
            ids,
            [
                "old-large",
                "installer",
                "cache",
                "dev-builds",
                "ios-backups",
                "brew-cache",
                "docker",
                "browser-cache"
            ]
        );
    }

    #[test]
    fn test_old_large_thresholds_are_strict() {
        let rules = RuleSet::default();
        let mut entry = EntryView {
            name: "disk.img",
            size: OLD_LARGE_MIN_SIZE,
            path: "/data/disk.img",
            age_days: 400,
        };
        assert!(rules.classify(&entry).is_empty());

        entry.size += 1;
        assert_eq!(rules.classify(&entry), ["Arquivos antigos e grandes"]);

        entry.age_days = OLD_LARGE_MIN_AGE_DAYS;
        assert!(rules.classify(&entry).is_empty());
    }

    #[test]
    fn test_installer_extensions_case_insensitive() {
        let rules = RuleSet::default();
        for name in ["a.dmg", "b.PKG", "c.Zip", "d.rar", ".zip"] {
            let path = format!("/x/{name}");
            assert_eq!(
                rules.classify(&view(name, &path)),
                ["Instaladores e imagens de disco"],
                "{name}"
            );
        }
        assert!(rules.classify(&view("zip", "/x/zip")).is_empty());
        assert!(rules.classify(&view("a.zip.txt", "/x/a.zip.txt")).is_empty());
    }

    #[test]
    fn test_cache_by_extension_or_location() {
        let rules = RuleSet::default();
        assert_eq!(rules.classify(&view("app.LOG", "/var/app.LOG")), ["Caches e logs"]);
        assert_eq!(
            rules.classify(&view("blob", "/Users/me/Library/Caches/com.foo/blob")),
            ["Caches e logs"]
        );
    }

    #[test]
    fn test_multiple_labels_follow_rule_order() {
        let rules = RuleSet::default();
        let labels = rules.classify(&view(
            "Cache.db",
            "/Users/me/Library/Caches/Homebrew/downloads/Cache.db",
        ));
        assert_eq!(labels, ["Caches e logs", "Cache do Homebrew"]);

        let labels = rules.classify(&view(
            "bottle.zip",
            "/Users/me/Library/Caches/Homebrew/bottle.zip",
        ));
        assert_eq!(
            labels,
            [
                "Instaladores e imagens de disco",
                "Caches e logs",
                "Cache do Homebrew"
            ]
        );
    }

    #[test]
    fn test_path_segment_rules() {
        let rules = RuleSet::default();
        let cases = [
            ("/p/node_modules/x/index.js", "dev-builds"),
            ("/p/DerivedData/Build/a.o", "dev-builds"),
            ("/home/me/.gradle/caches/a.jar", "dev-builds"),
            ("/Users/me/Library/Application Support/MobileSync/Backup/abc/1", "ios-backups"),
            (
                "/Users/me/Library/Containers/com.docker.docker/Data/vms/0/data/Docker.raw",
                "docker",
            ),
        ];
        for (path, id) in cases {
            let name = path.rsplit('/').next().unwrap();
            let matched: Vec<_> = rules.matching(&view(name, path)).map(|r| r.id).collect();
            assert_eq!(matched, [id], "{path}");
        }
    }

    #[test]
    fn test_browser_cache() {
        let rules = RuleSet::default();
        for dir in [
            "Google/Chrome",
            "com.apple.Safari",
            "Microsoft Edge",
            "Firefox",
            "BraveSoftware",
        ] {
            let path = format!("/Users/me/Library/Caches/{dir}/Default/data_1");
            let ids: Vec<_> = rules.matching(&view("data_1", &path)).map(|r| r.id).collect();
            assert_eq!(ids, ["cache", "browser-cache"], "{dir}");
        }
    }

    #[test]
    fn test_segment_requires_directory_boundaries() {
        let rules = RuleSet::default();
        assert!(rules.classify(&view("a.js", "/p/my_node_modules/a.js")).is_empty());
        assert!(rules.classify(&view("x", "/Library/CachesOld/x")).is_empty());
    }

    #[test]
    fn test_classification_is_deterministic() {
        let rules = RuleSet::default();
        let entry = view("build.log", "/p/node_modules/build.log");
        assert_eq!(rules.classify(&entry), rules.classify(&entry));
    }

    #[test]
    fn test_with_rule_appends() {
        fn is_tmp(entry: &EntryView<'_>) -> bool {
            entry.name.ends_with(".tmp")
        }

        let base = RuleSet::default();
        let extended = base.with_rule(Rule::new("tmp", "Temporarios", is_tmp));

        assert_eq!(base.len(), BUILTIN_RULES.len());
        assert_eq!(extended.len(), BUILTIN_RULES.len() + 1);
        assert_eq!(extended.rules().last().map(|r| r.id), Some("tmp"));
        assert_eq!(
            extended.classify(&view("x.log.tmp", "/a/x.log.tmp")),
            ["Temporarios"]
        );
        assert!(extended.get("installer").is_some());
    }
}
