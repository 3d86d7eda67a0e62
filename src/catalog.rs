//! Project category filter.

use crate::content::{Project, ProjectCategory};

/// Filter selection: one project category or everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FilterCategory {
    #[default]
    All,
    Web,
    Mobile,
    Desktop,
}

impl FilterCategory {
    pub fn admits(&self, category: ProjectCategory) -> bool {
        match self {
            FilterCategory::All => true,
            FilterCategory::Web => category == ProjectCategory::Web,
            FilterCategory::Mobile => category == ProjectCategory::Mobile,
            FilterCategory::Desktop => category == ProjectCategory::Desktop,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterOption {
    pub label: &'static str,
    pub value: FilterCategory,
}

/// Filter buttons in display order.
pub const FILTER_OPTIONS: [FilterOption; 4] = [
    FilterOption {
        label: "All Projects",
        value: FilterCategory::All,
    },
    FilterOption {
        label: "Web Development",
        value: FilterCategory::Web,
    },
    FilterOption {
        label: "Mobile Apps",
        value: FilterCategory::Mobile,
    },
    FilterOption {
        label: "Desktop Applications",
        value: FilterCategory::Desktop,
    },
];

pub fn filter_projects(projects: &[Project], selection: FilterCategory) -> Vec<&Project> {
    projects
        .iter()
        .filter(|project| selection.admits(project.category))
        .collect()
}

/// Active selection plus the list derived from it.
///
/// The visible list is rebuilt from scratch on every selection.
#[derive(Debug)]
pub struct ProjectFilter<'a> {
    projects: &'a [Project],
    active: FilterCategory,
    visible: Vec<&'a Project>,
}

impl<'a> ProjectFilter<'a> {
    pub fn new(projects: &'a [Project]) -> Self {
        Self {
            projects,
            active: FilterCategory::All,
            visible: filter_projects(projects, FilterCategory::All),
        }
    }

    pub fn select(&mut self, category: FilterCategory) -> &[&'a Project] {
        self.active = category;
        self.visible = filter_projects(self.projects, category);
        &self.visible
    }

    /// Move the selection `step` options along [`FILTER_OPTIONS`], wrapping.
    pub fn cycle(&mut self, step: isize) -> FilterCategory {
        let len = FILTER_OPTIONS.len() as isize;
        let current = FILTER_OPTIONS
            .iter()
            .position(|option| option.value == self.active)
            .unwrap_or(0) as isize;
        let next = (current + step).rem_euclid(len) as usize;
        let category = FILTER_OPTIONS[next].value;
        self.select(category);
        category
    }

    pub fn active(&self) -> FilterCategory {
        self.active
    }

    pub fn visible(&self) -> &[&'a Project] {
        &self.visible
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::PROJECTS;

    fn project(id: u32, category: ProjectCategory) -> Project {
        Project {
            id,
            title: "Sample",
            description: "",
            long_description: None,
            image_url: "",
            technologies: &[],
            category,
            demo_url: None,
            code_url: None,
            featured: false,
        }
    }

    #[test]
    fn all_returns_everything() {
        assert_eq!(filter_projects(&PROJECTS, FilterCategory::All).len(), PROJECTS.len());
    }

    #[test]
    fn desktop_yields_the_single_desktop_project() {
        let visible = filter_projects(&PROJECTS, FilterCategory::Desktop);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].title, "Desktop File Organizer");
    }

    #[test]
    fn category_without_projects_is_empty() {
        let data = vec![project(1, ProjectCategory::Web), project(2, ProjectCategory::Desktop)];
        let mut filter = ProjectFilter::new(&data);
        assert!(filter.select(FilterCategory::Mobile).is_empty());
        assert!(filter.is_empty());
    }

    #[test]
    fn reselecting_is_idempotent() {
        let mut filter = ProjectFilter::new(&PROJECTS);
        let first: Vec<u32> = filter.select(FilterCategory::Web).iter().map(|p| p.id).collect();
        let second: Vec<u32> = filter.select(FilterCategory::Web).iter().map(|p| p.id).collect();
        let third: Vec<u32> = filter.select(FilterCategory::Web).iter().map(|p| p.id).collect();
        assert_eq!(first, vec![1, 2, 3, 4]);
        assert_eq!(first, second);
        assert_eq!(second, third);
    }

    #[test]
    fn cycle_wraps_both_ways() {
        let mut filter = ProjectFilter::new(&PROJECTS);
        assert_eq!(filter.cycle(-1), FilterCategory::Desktop);
        assert_eq!(filter.cycle(1), FilterCategory::All);
        assert_eq!(filter.cycle(2), FilterCategory::Mobile);
        assert_eq!(filter.visible().len(), 1);
    }
}
