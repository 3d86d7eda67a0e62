use crossterm::style::Stylize;

use crate::content::{SKILLS, Skill, skills_by_category};
use crate::error::PageResult;
use crate::geometry::Size;
use crate::router::PageId;

use super::{Page, PageView};

const MAX_LEVEL: u8 = 5;

/// Skills grouped by category with five-step level bars.
#[derive(Debug, Default)]
pub struct SkillsPage;

impl SkillsPage {
    pub fn new() -> Self {
        Self
    }
}

pub fn level_bar(level: u8) -> String {
    let filled = level.min(MAX_LEVEL) as usize;
    format!(
        "{}{}",
        "■".repeat(filled).green(),
        "□".repeat(MAX_LEVEL as usize - filled).dark_grey()
    )
}

fn name_column(skills: &[&Skill]) -> usize {
    skills.iter().map(|skill| skill.name.len()).max().unwrap_or(0)
}

impl Page for SkillsPage {
    fn id(&self) -> PageId {
        PageId::Skills
    }

    fn render(&self, _area: Size) -> PageResult<PageView> {
        let mut view = PageView::new();
        view.title("Skills & Expertise").line(
            "Una descripción general de mis habilidades técnicas y áreas de especialización \
             en el desarrollo de software.",
        );

        for (category, skills) in skills_by_category(&SKILLS) {
            view.heading(category.title());
            let width = name_column(&skills);
            for skill in skills {
                view.line(format!(
                    "  {:<width$}  {}",
                    skill.name,
                    level_bar(skill.level)
                ));
            }
        }
        Ok(view)
    }
}
