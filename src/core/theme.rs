// Theme resolution, the persisted theme preference, and the shared theme
// context instances subscribe to.

pub const THEME_ATTRIBUTE: &str = "data-theme";
pub const THEME_STORAGE_KEY: &str = "theme";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

/// User-selected theme, as persisted in local storage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThemePreference {
    #[default]
    Auto,
    Light,
    Dark,
}

impl ThemePreference {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemePreference::Auto => "auto",
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "auto" => Some(ThemePreference::Auto),
            "light" => Some(ThemePreference::Light),
            "dark" => Some(ThemePreference::Dark),
            _ => None,
        }
    }

    /// Missing or unrecognized stored values fall back to `Auto`.
    pub fn from_stored(value: Option<&str>) -> Self {
        value.and_then(Self::parse).unwrap_or_default()
    }

    /// Value for the document theme attribute; `None` means remove it so the
    /// OS preference applies.
    pub fn attribute_value(self) -> Option<&'static str> {
        match self {
            ThemePreference::Auto => None,
            ThemePreference::Light => Some("light"),
            ThemePreference::Dark => Some("dark"),
        }
    }
}

/// Snapshot of every input theme resolution looks at.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ThemeSignals {
    pub attribute: Option<String>,
    pub classes: Vec<String>,
    pub prefers_dark: bool,
}

impl ThemeSignals {
    pub fn with_class_list(
        attribute: Option<String>,
        class_list: &str,
        prefers_dark: bool,
    ) -> Self {
        Self {
            attribute,
            classes: class_list.split_whitespace().map(str::to_owned).collect(),
            prefers_dark,
        }
    }

    fn has_class(&self, names: &[&str]) -> bool {
        self.classes.iter().any(|c| names.contains(&c.as_str()))
    }
}

/// Resolve the effective theme. Priority: explicit attribute, then root
/// classes, then the OS dark-mode preference, then light.
pub fn resolve_theme(signals: &ThemeSignals) -> Theme {
    if let Some(theme) = signals.attribute.as_deref().and_then(Theme::parse) {
        return theme;
    }
    if signals.has_class(&["dark", "dark-theme"]) {
        return Theme::Dark;
    }
    if signals.has_class(&["light", "light-theme"]) {
        return Theme::Light;
    }
    if signals.prefers_dark {
        Theme::Dark
    } else {
        Theme::Light
    }
}

pub type SubscriptionId = u64;

/// Document-wide theme state with explicit subscribe/notify.
///
/// Subscribers are only called when a published snapshot resolves to a
/// different theme than the current one.
pub struct ThemeContext {
    current: Theme,
    next_id: SubscriptionId,
    subscribers: Vec<(SubscriptionId, Box<dyn FnMut(Theme)>)>,
}

impl ThemeContext {
    pub fn new(initial: Theme) -> Self {
        Self {
            current: initial,
            next_id: 1,
            subscribers: Vec::new(),
        }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    pub fn subscribe(&mut self, listener: impl FnMut(Theme) + 'static) -> SubscriptionId {
        let id = self.next_id;
        self.next_id += 1;
        self.subscribers.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Subscribe from fresh signals. Existing subscribers are caught up first,
    /// so a change the observers have not reported yet still reaches them.
    pub fn join(
        &mut self,
        signals: &ThemeSignals,
        listener: impl FnMut(Theme) + 'static,
    ) -> (SubscriptionId, Theme) {
        self.publish(signals);
        (self.subscribe(listener), self.current)
    }

    /// Re-resolve and notify subscribers if the theme changed.
    pub fn publish(&mut self, signals: &ThemeSignals) -> Option<Theme> {
        let next = resolve_theme(signals);
        if next == self.current {
            return None;
        }
        self.current = next;
        for (_, listener) in self.subscribers.iter_mut() {
            listener(next);
        }
        Some(next)
    }
}
