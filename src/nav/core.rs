/// Header link: visible label and target path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub path: &'static str,
}

/// Header links in display order; keys `1`..`4` follow this order.
pub const NAV_LINKS: [NavLink; 4] = [
    NavLink {
        label: "Home",
        path: "/",
    },
    NavLink {
        label: "Projects",
        path: "/projects",
    },
    NavLink {
        label: "Skills",
        path: "/skills",
    },
    NavLink {
        label: "Contact",
        path: "/contact",
    },
];

/// Result of a [`NavigationState::navigate`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub from: String,
    pub to: String,
    pub menu_was_open: bool,
}

impl Navigation {
    pub fn changed(&self) -> bool {
        self.from != self.to
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationState {
    current_path: String,
    menu_open: bool,
}

impl NavigationState {
    /// Start at `path`; the empty path is the router's untouched state.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            current_path: path.into(),
            menu_open: false,
        }
    }

    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    pub fn menu_open(&self) -> bool {
        self.menu_open
    }

    /// Move to `path` and collapse the menu, whatever its prior state.
    pub fn navigate(&mut self, path: impl Into<String>) -> Navigation {
        let to = path.into();
        let from = std::mem::replace(&mut self.current_path, to.clone());
        let menu_was_open = std::mem::replace(&mut self.menu_open, false);
        Navigation {
            from,
            to,
            menu_was_open,
        }
    }

    /// Flip the menu; never touches the current path.
    pub fn toggle_menu(&mut self) -> bool {
        self.menu_open = !self.menu_open;
        self.menu_open
    }

    /// Whether a link declared with `link_path` should be highlighted.
    pub fn is_active(&self, link_path: &str) -> bool {
        link_path == self.current_path || (link_path == "/" && self.current_path.is_empty())
    }
}
