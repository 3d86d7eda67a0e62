//! Hardcoded portfolio content.
//!
//! The site has no backing store; every page reads from these tables.

mod data;

pub use data::{
    ABOUT_PARAGRAPHS, AVATAR, CONTACT_DETAILS, FEATURED_PROJECTS, HOME_SKILL_GROUPS, OWNER_NAME,
    OWNER_TITLE, PROJECTS, SITE_NAME, SKILLS, SOCIAL_LINKS, TAGLINE,
};

/// Category a project belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectCategory {
    Web,
    Mobile,
    Desktop,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: u32,
    pub title: &'static str,
    pub description: &'static str,
    pub long_description: Option<&'static str>,
    pub image_url: &'static str,
    pub technologies: &'static [&'static str],
    pub category: ProjectCategory,
    pub demo_url: Option<&'static str>,
    pub code_url: Option<&'static str>,
    pub featured: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkillCategory {
    Frontend,
    Backend,
    Tools,
    Other,
}

impl SkillCategory {
    pub fn title(&self) -> &'static str {
        match self {
            SkillCategory::Frontend => "Frontend Development",
            SkillCategory::Backend => "Backend Development",
            SkillCategory::Tools => "Tools & Workflow",
            SkillCategory::Other => "Other Skills",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Skill {
    pub name: &'static str,
    /// Proficiency from 1 to 5.
    pub level: u8,
    pub category: SkillCategory,
}

/// Short project card shown on the home page.
#[derive(Debug, Clone, Copy)]
pub struct FeaturedProject {
    pub id: u32,
    pub title: &'static str,
    pub description: &'static str,
    pub technologies: &'static [&'static str],
}

/// Skill summary shown on the home page.
#[derive(Debug, Clone, Copy)]
pub struct SkillGroup {
    pub category: &'static str,
    pub skills: &'static [&'static str],
}

#[derive(Debug, Clone, Copy)]
pub struct SocialLink {
    pub name: &'static str,
    pub url: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct ContactDetail {
    pub icon: &'static str,
    pub text: &'static str,
}

/// Group skills by category, categories in order of first appearance.
pub fn skills_by_category(skills: &[Skill]) -> Vec<(SkillCategory, Vec<&Skill>)> {
    let mut groups: Vec<(SkillCategory, Vec<&Skill>)> = Vec::new();
    for skill in skills {
        match groups
            .iter_mut()
            .find(|(category, _)| *category == skill.category)
        {
            Some((_, members)) => members.push(skill),
            None => groups.push((skill.category, vec![skill])),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_ids_are_unique() {
        let mut ids: Vec<_> = PROJECTS.iter().map(|p| p.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), PROJECTS.len());
    }

    #[test]
    fn skill_levels_in_range() {
        assert!(SKILLS.iter().all(|s| (1..=5).contains(&s.level)));
    }

    #[test]
    fn skills_grouped_in_first_appearance_order() {
        let groups = skills_by_category(&SKILLS);
        let order: Vec<_> = groups.iter().map(|(c, _)| *c).collect();
        assert_eq!(
            order,
            vec![
                SkillCategory::Frontend,
                SkillCategory::Backend,
                SkillCategory::Tools,
                SkillCategory::Other
            ]
        );
        assert_eq!(groups[0].1.len(), 7);
        assert_eq!(groups.iter().map(|(_, s)| s.len()).sum::<usize>(), SKILLS.len());
    }
}
