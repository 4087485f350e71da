use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

/// Storage key the browser runtime and the controller share.
pub const STORAGE_KEY: &str = "theme";

/// Root class that switches the stylesheet into dark mode.
pub const DARK_CLASS: &str = "dark";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Light,
    #[default]
    Dark,
}

impl ThemePreference {
    /// Parses the persisted literal. Anything but `light`/`dark` is rejected.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    /// Toggle button title, as shown next to the sun/moon icon.
    pub fn title(self) -> &'static str {
        match self {
            Self::Light => "Tema: Claro",
            Self::Dark => "Tema: Escuro",
        }
    }
}

/// Browser-local key-value storage.
pub trait PreferenceStore {
    fn load(&self, key: &str) -> anyhow::Result<Option<String>>;
    fn save(&mut self, key: &str, value: &str) -> anyhow::Result<()>;
}

/// System-level colour scheme signal (`prefers-color-scheme`).
pub trait AmbientPreference {
    fn preferred(&self) -> Option<ThemePreference>;
}

impl<F> AmbientPreference for F
where
    F: Fn() -> Option<ThemePreference>,
{
    fn preferred(&self) -> Option<ThemePreference> {
        self()
    }
}

/// No ambient signal available (e.g. no display environment).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAmbient;

impl AmbientPreference for NoAmbient {
    fn preferred(&self) -> Option<ThemePreference> {
        None
    }
}

/// Where the visual flag lands.
pub trait ThemeSurface {
    fn set_dark(&mut self, dark: bool);
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.to_string(), value.to_string());
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Storage that refuses every access, like a sandboxed iframe or disabled cookies.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableStore;

impl PreferenceStore for UnavailableStore {
    fn load(&self, _key: &str) -> anyhow::Result<Option<String>> {
        anyhow::bail!("local storage is unavailable")
    }

    fn save(&mut self, _key: &str, _value: &str) -> anyhow::Result<()> {
        anyhow::bail!("local storage is unavailable")
    }
}

/// Class list of the document root element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootClassList {
    classes: BTreeSet<String>,
}

impl RootClassList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_preference(pref: ThemePreference) -> Self {
        let mut list = Self::new();
        list.set_dark(pref.is_dark());
        list
    }

    pub fn contains(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    /// Value for a `class` attribute; `None` when empty.
    pub fn attr(&self) -> Option<String> {
        if self.classes.is_empty() {
            return None;
        }
        Some(self.classes.iter().cloned().collect::<Vec<_>>().join(" "))
    }
}

impl ThemeSurface for RootClassList {
    fn set_dark(&mut self, dark: bool) {
        if dark {
            self.classes.insert(DARK_CLASS.to_string());
        } else {
            self.classes.remove(DARK_CLASS);
        }
    }
}

/// Page-owned theme state with its injected capabilities.
pub struct ThemeController<S, A, V> {
    store: S,
    ambient: A,
    surface: V,
    key: String,
    current: ThemePreference,
}

impl<S, A, V> ThemeController<S, A, V>
where
    S: PreferenceStore,
    A: AmbientPreference,
    V: ThemeSurface,
{
    pub fn new(store: S, ambient: A, surface: V) -> Self {
        Self::with_key(store, ambient, surface, STORAGE_KEY)
    }

    pub fn with_key(store: S, ambient: A, surface: V, key: &str) -> Self {
        Self {
            store,
            ambient,
            surface,
            key: key.to_string(),
            current: ThemePreference::default(),
        }
    }

    /// Resolves stored → ambient → dark and applies the result.
    pub fn initialize(&mut self) -> ThemePreference {
        let resolved = match self.store.load(&self.key) {
            Ok(stored) => {
                let parsed = stored.as_deref().and_then(ThemePreference::parse);
                if parsed.is_none() {
                    if let Some(raw) = stored.as_deref() {
                        tracing::debug!(key = %self.key, value = raw, "ignoring unknown stored theme");
                    }
                }
                parsed
                    .or_else(|| self.ambient.preferred())
                    .unwrap_or_default()
            }
            Err(e) => {
                tracing::warn!(error = %e, "theme storage unavailable; using default");
                ThemePreference::default()
            }
        };

        self.current = resolved;
        self.surface.set_dark(resolved.is_dark());
        resolved
    }

    pub fn toggle(&mut self) -> ThemePreference {
        let next = self.current.toggled();
        self.current = next;
        self.surface.set_dark(next.is_dark());
        if let Err(e) = self.store.save(&self.key, next.as_str()) {
            tracing::warn!(error = %e, theme = next.as_str(), "failed to persist theme");
        }
        next
    }

    pub fn current(&self) -> ThemePreference {
        self.current
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn surface(&self) -> &V {
        &self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller(store: MemoryStore) -> ThemeController<MemoryStore, NoAmbient, RootClassList> {
        ThemeController::new(store, NoAmbient, RootClassList::new())
    }

    #[test]
    fn stored_values_win() {
        for pref in [ThemePreference::Light, ThemePreference::Dark] {
            let mut c = ThemeController::new(
                MemoryStore::with_entry(STORAGE_KEY, pref.as_str()),
                || Some(pref.toggled()),
                RootClassList::new(),
            );
            assert_eq!(c.initialize(), pref);
            assert_eq!(c.surface().contains(DARK_CLASS), pref.is_dark());
        }
    }

    #[test]
    fn invalid_stored_value_falls_through_to_ambient() {
        let mut c = ThemeController::new(
            MemoryStore::with_entry(STORAGE_KEY, "sepia"),
            || Some(ThemePreference::Light),
            RootClassList::new(),
        );
        assert_eq!(c.initialize(), ThemePreference::Light);
        assert!(!c.surface().contains(DARK_CLASS));

        let mut c = controller(MemoryStore::with_entry(STORAGE_KEY, "DARK "));
        assert_eq!(c.initialize(), ThemePreference::Dark);
        assert!(c.surface().contains(DARK_CLASS));
    }

    #[test]
    fn absent_value_without_ambient_defaults_to_dark() {
        let mut c = controller(MemoryStore::new());
        assert_eq!(c.initialize(), ThemePreference::Dark);
        assert_eq!(c.surface().attr().as_deref(), Some("dark"));
    }

    #[test]
    fn unavailable_storage_fails_open() {
        let mut c = ThemeController::new(
            UnavailableStore,
            || Some(ThemePreference::Light),
            RootClassList::new(),
        );
        assert_eq!(c.initialize(), ThemePreference::Dark);
        assert_eq!(c.toggle(), ThemePreference::Light);
        assert!(!c.surface().contains(DARK_CLASS));
    }

    #[test]
    fn toggle_twice_restores_preference_and_storage() {
        let mut c = controller(MemoryStore::with_entry(STORAGE_KEY, "light"));
        let original = c.initialize();

        assert_eq!(c.toggle(), ThemePreference::Dark);
        assert_eq!(c.store().get(STORAGE_KEY), Some("dark"));
        assert!(c.surface().contains(DARK_CLASS));

        assert_eq!(c.toggle(), original);
        assert_eq!(c.store().get(STORAGE_KEY), Some("light"));
        assert!(!c.surface().contains(DARK_CLASS));
    }

    #[test]
    fn custom_key_is_used_for_both_directions() {
        let mut c = ThemeController::with_key(
            MemoryStore::with_entry("site-theme", "light"),
            NoAmbient,
            RootClassList::new(),
            "site-theme",
        );
        assert_eq!(c.initialize(), ThemePreference::Light);
        c.toggle();
        assert_eq!(c.store().get("site-theme"), Some("dark"));
        assert_eq!(c.store().get(STORAGE_KEY), None);
    }
}
