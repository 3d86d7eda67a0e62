use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use crossterm::style::Stylize;

use crate::content::{
    ABOUT_PARAGRAPHS, AVATAR, FEATURED_PROJECTS, HOME_SKILL_GROUPS, OWNER_NAME, OWNER_TITLE,
    TAGLINE,
};
use crate::error::PageResult;
use crate::geometry::Size;
use crate::router::PageId;
use crate::runtime::EventFlow;

use super::{Page, PageContext, PageView, action};

/// Landing page: hero, about, skill summary, featured projects.
#[derive(Debug, Default)]
pub struct HomePage;

impl HomePage {
    pub fn new() -> Self {
        Self
    }
}

impl Page for HomePage {
    fn id(&self) -> PageId {
        PageId::Home
    }

    fn render(&self, _area: Size) -> PageResult<PageView> {
        let mut view = PageView::new();
        view.line(format!("Hello, I'm {}", OWNER_NAME.bold().magenta()))
            .line(OWNER_TITLE.italic().to_string())
            .blank();
        for line in TAGLINE {
            view.line(line);
        }
        view.line(format!("[avatar: {AVATAR}]").dark_grey().to_string())
            .blank()
            .line(format!(
                "{}   {}",
                action("p", "View My Work"),
                action("c", "Contact Me")
            ));

        view.heading("Conoceme Mejor");
        for paragraph in ABOUT_PARAGRAPHS {
            view.line(paragraph).blank();
        }

        view.heading("My Skills");
        for group in HOME_SKILL_GROUPS {
            view.line(format!("  {}", group.category.bold()))
                .line(format!("    {}", group.skills.join(" · ")));
        }
        view.line(action("s", "View All Skills"));

        view.heading("Proyectos Principales");
        for project in FEATURED_PROJECTS {
            view.line(format!("  {}", project.title.bold()))
                .line(format!("    {}", project.description))
                .line(format!("    {}", project.technologies.join(" · ").green()))
                .line(format!("    {}", action("p", "See Details")));
        }
        view.line(action("p", "View All Projects"));

        view.heading("Get In Touch")
            .line("Interested in working together or have a question? Feel free to reach out!")
            .line(action("c", "Contact Me"));

        Ok(view)
    }

    fn handle_key(&mut self, ctx: &mut PageContext<'_>, key: &KeyEvent) -> PageResult<EventFlow> {
        if key.kind != KeyEventKind::Press {
            return Ok(EventFlow::Continue);
        }
        let target = match key.code {
            KeyCode::Char('p') => "/projects",
            KeyCode::Char('s') => "/skills",
            KeyCode::Char('c') => "/contact",
            _ => return Ok(EventFlow::Continue),
        };
        ctx.navigate(target);
        Ok(EventFlow::Consumed)
    }
}
