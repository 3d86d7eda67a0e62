use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use crossterm::style::Stylize;

use crate::catalog::{FILTER_OPTIONS, FilterCategory, ProjectFilter};
use crate::content::{PROJECTS, Project, ProjectCategory};
use crate::cursor::hyperlink;
use crate::error::PageResult;
use crate::geometry::Size;
use crate::router::PageId;
use crate::runtime::EventFlow;

use super::{Page, PageContext, PageView};

pub const EMPTY_CATEGORY_NOTICE: &str = "No projects found in this category.";

/// Project catalogue with a category filter bar.
pub struct ProjectsPage {
    filter: ProjectFilter<'static>,
}

impl ProjectsPage {
    pub fn new() -> Self {
        Self::with_projects(&PROJECTS)
    }

    pub fn with_projects(projects: &'static [Project]) -> Self {
        Self {
            filter: ProjectFilter::new(projects),
        }
    }

    pub fn select(&mut self, category: FilterCategory) {
        self.filter.select(category);
    }

    pub fn active_filter(&self) -> FilterCategory {
        self.filter.active()
    }

    fn filter_bar(&self) -> String {
        FILTER_OPTIONS
            .iter()
            .map(|option| {
                if option.value == self.filter.active() {
                    format!(" {} ", option.label).reverse().bold().to_string()
                } else {
                    format!(" {} ", option.label)
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn push_card(view: &mut PageView, project: &Project) {
        let tag = match project.category {
            ProjectCategory::Web => "web",
            ProjectCategory::Mobile => "mobile",
            ProjectCategory::Desktop => "desktop",
        };
        view.line(format!(
            "{} {}",
            project.title.bold(),
            format!("({tag})").dark_grey()
        ))
        .line(format!("  {}", project.description))
        .line(format!("  {}", project.technologies.join(" · ").green()));

        let mut links = Vec::new();
        if let Some(url) = project.demo_url {
            links.push(hyperlink(url, "Live Demo"));
        }
        if let Some(url) = project.code_url {
            links.push(hyperlink(url, "View Code"));
        }
        if !links.is_empty() {
            view.line(format!("  {}", links.join("  ")));
        }
        view.blank();
    }
}

impl Default for ProjectsPage {
    fn default() -> Self {
        Self::new()
    }
}

impl Page for ProjectsPage {
    fn id(&self) -> PageId {
        PageId::Projects
    }

    fn render(&self, _area: Size) -> PageResult<PageView> {
        let mut view = PageView::new();
        view.title("My Projects").line(
            "Here are some of the projects I've worked on. Each project represents different \
             skills and technologies I've utilized in my development journey.",
        );
        view.blank()
            .line(self.filter_bar())
            .line("←/→ change filter".dark_grey().to_string())
            .blank();

        if self.filter.is_empty() {
            view.line(EMPTY_CATEGORY_NOTICE.italic().to_string());
            return Ok(view);
        }

        for project in self.filter.visible() {
            Self::push_card(&mut view, project);
        }
        Ok(view)
    }

    fn handle_key(&mut self, _ctx: &mut PageContext<'_>, key: &KeyEvent) -> PageResult<EventFlow> {
        if key.kind != KeyEventKind::Press {
            return Ok(EventFlow::Continue);
        }
        match key.code {
            KeyCode::Left => {
                self.filter.cycle(-1);
                Ok(EventFlow::Consumed)
            }
            KeyCode::Right => {
                self.filter.cycle(1);
                Ok(EventFlow::Consumed)
            }
            _ => Ok(EventFlow::Continue),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::testing::{key, plain};

    static WEB_ONLY: [Project; 1] = [Project {
        id: 1,
        title: "Only Web",
        description: "web project",
        long_description: None,
        image_url: "/placeholder-project.jpg",
        technologies: &["Rust"],
        category: ProjectCategory::Web,
        demo_url: None,
        code_url: None,
        featured: false,
    }];

    #[test]
    fn shows_all_projects_by_default() {
        let page = ProjectsPage::new();
        let text = plain(&page.render(Size::new(80, 24)).unwrap().text());
        for project in PROJECTS.iter() {
            assert!(text.contains(project.title), "missing {}", project.title);
        }
    }

    #[test]
    fn desktop_filter_shows_one_card() {
        let mut page = ProjectsPage::new();
        page.select(FilterCategory::Desktop);
        let text = plain(&page.render(Size::new(80, 24)).unwrap().text());
        assert!(text.contains("Desktop File Organizer"));
        assert!(!text.contains("E-commerce Website"));
        assert!(text.contains("View Code"));
        assert!(!text.contains("Live Demo"));
    }

    #[test]
    fn empty_category_renders_notice() {
        let mut page = ProjectsPage::with_projects(&WEB_ONLY);
        page.select(FilterCategory::Mobile);
        let text = plain(&page.render(Size::new(80, 24)).unwrap().text());
        assert!(text.contains(EMPTY_CATEGORY_NOTICE));
        assert!(!text.contains("Only Web"));
    }

    #[test]
    fn arrow_keys_cycle_filter() {
        let mut page = ProjectsPage::new();
        let mut ctx = PageContext::new("/projects");
        page.handle_key(&mut ctx, &key(KeyCode::Right)).unwrap();
        assert_eq!(page.active_filter(), FilterCategory::Web);
        page.handle_key(&mut ctx, &key(KeyCode::Left)).unwrap();
        page.handle_key(&mut ctx, &key(KeyCode::Left)).unwrap();
        assert_eq!(page.active_filter(), FilterCategory::Desktop);
        assert!(ctx.into_requests().is_empty());
    }
}
