use super::{
    ContactDetail, FeaturedProject, Project, ProjectCategory, Skill, SkillCategory, SkillGroup,
    SocialLink,
};

pub const SITE_NAME: &str = "WR Web Design";
pub const OWNER_NAME: &str = "Williams R. Villavizar Hdez.";
pub const OWNER_TITLE: &str = "Web Developer & Web Designer";
pub const TAGLINE: [&str; 2] = [
    "Creo tu pagina web deseada a partir de tus gustos y decisiones.",
    "Mi pasion la tecnologia, mi hobbie los videojuegos.",
];
pub const AVATAR: &str = "/IMG_0109.JPG";

pub const ABOUT_PARAGRAPHS: [&str; 3] = [
    "Soy un desarrollador de software dedicado con experiencia en desarrollo web. \
     Mi trayectoria en programación comenzó hace varios años y, desde entonces, \
     me apasiona crear aplicaciones eficientes y fáciles de usar.",
    "Me especializo en desarrollo front-end con React, pero también me siento cómodo \
     trabajando con tecnologías back-end. Disfruto aprendiendo nuevas habilidades y \
     manteniéndome al día con las últimas tendencias del sector.",
    "Tambien me dedico a estudiar el area de la ciberseguridad, en la cual tengo un gran \
     interes, ya que me gusta aprender sobre la seguridad de los sistemas y redes.",
];

pub const HOME_SKILL_GROUPS: [SkillGroup; 3] = [
    SkillGroup {
        category: "Frontend",
        skills: &["React", "TypeScript", "HTML/CSS", "JavaScript"],
    },
    SkillGroup {
        category: "Backend",
        skills: &["Node.js", "Express", "MongoDB", "SQL"],
    },
    SkillGroup {
        category: "Tools",
        skills: &["Git", "Docker", "Webpack", "Jest"],
    },
];

pub const FEATURED_PROJECTS: [FeaturedProject; 2] = [
    FeaturedProject {
        id: 1,
        title: "E-commerce Website",
        description: "A fully responsive e-commerce platform with product filtering, shopping cart, and checkout.",
        technologies: &["React", "Node.js", "MongoDB"],
    },
    FeaturedProject {
        id: 2,
        title: "Task Management App",
        description: "A project management tool that helps users organize tasks, set priorities, and track progress.",
        technologies: &["React", "TypeScript", "Firebase"],
    },
];

const PLACEHOLDER_IMAGE: &str = "/placeholder-project.jpg";
const DEMO_URL: &str = "https://example.com/demo";
const CODE_URL: &str = "https://github.com/yourusername/project-repo";

pub static PROJECTS: [Project; 6] = [
    Project {
        id: 1,
        title: "E-commerce Website",
        description: "A fully responsive e-commerce platform with product filtering, shopping cart, and checkout functionality.",
        long_description: Some(
            "This project is a comprehensive e-commerce solution built with React and Node.js. \
             It features user authentication, product management, shopping cart functionality, \
             and secure payment processing. The platform is fully responsive and optimized for all devices.",
        ),
        image_url: PLACEHOLDER_IMAGE,
        technologies: &["React", "Node.js", "Express", "MongoDB"],
        category: ProjectCategory::Web,
        demo_url: Some(DEMO_URL),
        code_url: Some(CODE_URL),
        featured: true,
    },
    Project {
        id: 2,
        title: "Task Management App",
        description: "A project management tool that helps users organize tasks, set priorities, and track progress.",
        long_description: Some(
            "This task management application helps teams organize their work efficiently. \
             It includes features like task assignment, progress tracking, due dates, and priority management.",
        ),
        image_url: PLACEHOLDER_IMAGE,
        technologies: &["React", "TypeScript", "Firebase"],
        category: ProjectCategory::Web,
        demo_url: Some(DEMO_URL),
        code_url: Some(CODE_URL),
        featured: true,
    },
    Project {
        id: 3,
        title: "Weather Application",
        description: "A weather app that provides real-time forecasts and historical weather data for locations worldwide.",
        long_description: Some(
            "This weather application delivers accurate forecasts using data from multiple weather APIs. \
             Users can search for locations, save favorites, and view detailed weather information.",
        ),
        image_url: PLACEHOLDER_IMAGE,
        technologies: &["JavaScript", "API Integration", "CSS"],
        category: ProjectCategory::Web,
        demo_url: Some(DEMO_URL),
        code_url: Some(CODE_URL),
        featured: false,
    },
    Project {
        id: 4,
        title: "Personal Blog",
        description: "A blog platform with content management system, user authentication, and commenting features.",
        long_description: Some(
            "This personal blogging platform allows for easy content creation and management. \
             It features a custom CMS, comment system, user profiles, and search functionality.",
        ),
        image_url: PLACEHOLDER_IMAGE,
        technologies: &["React", "Node.js", "MySQL"],
        category: ProjectCategory::Web,
        demo_url: Some(DEMO_URL),
        code_url: Some(CODE_URL),
        featured: false,
    },
    Project {
        id: 5,
        title: "Fitness Tracker Mobile App",
        description: "A mobile application for tracking workouts, nutrition, and fitness progress.",
        long_description: Some(
            "This fitness tracking app helps users monitor their health journey by logging workouts, \
             tracking nutrition, and visualizing progress over time.",
        ),
        image_url: PLACEHOLDER_IMAGE,
        technologies: &["React Native", "Firebase", "Redux"],
        category: ProjectCategory::Mobile,
        demo_url: Some(DEMO_URL),
        code_url: Some(CODE_URL),
        featured: false,
    },
    Project {
        id: 6,
        title: "Desktop File Organizer",
        description: "A desktop utility that automatically organizes files based on type, date, or custom rules.",
        long_description: Some(
            "This desktop application helps users maintain an organized file system by automatically \
             sorting and categorizing files according to customizable rules.",
        ),
        image_url: PLACEHOLDER_IMAGE,
        technologies: &["Electron", "JavaScript", "Node.js"],
        category: ProjectCategory::Desktop,
        demo_url: None,
        code_url: Some(CODE_URL),
        featured: false,
    },
];

const fn skill(name: &'static str, level: u8, category: SkillCategory) -> Skill {
    Skill {
        name,
        level,
        category,
    }
}

pub static SKILLS: [Skill; 20] = [
    skill("HTML5", 5, SkillCategory::Frontend),
    skill("CSS3", 5, SkillCategory::Frontend),
    skill("JavaScript", 5, SkillCategory::Frontend),
    skill("TypeScript", 4, SkillCategory::Frontend),
    skill("React", 4, SkillCategory::Frontend),
    skill("Redux", 3, SkillCategory::Frontend),
    skill("Next.js", 3, SkillCategory::Frontend),
    skill("Node.js", 4, SkillCategory::Backend),
    skill("Express", 4, SkillCategory::Backend),
    skill("MongoDB", 3, SkillCategory::Backend),
    skill("SQL", 3, SkillCategory::Backend),
    skill("GraphQL", 2, SkillCategory::Backend),
    skill("Git", 4, SkillCategory::Tools),
    skill("Docker", 3, SkillCategory::Tools),
    skill("Webpack", 3, SkillCategory::Tools),
    skill("Jest", 3, SkillCategory::Tools),
    skill("Agile/Scrum", 4, SkillCategory::Other),
    skill("Problem Solving", 5, SkillCategory::Other),
    skill("UI/UX Design", 3, SkillCategory::Other),
    skill("Figma", 3, SkillCategory::Other),
];

pub const SOCIAL_LINKS: [SocialLink; 3] = [
    SocialLink {
        name: "GitHub",
        url: "https://github.com/willrd14",
    },
    SocialLink {
        name: "LinkedIn",
        url: "https://linkedin.com/in/williams-rafael-villavizar-hdez-652a7b158",
    },
    SocialLink {
        name: "Twitter",
        url: "https://twitter.com/wilrd3",
    },
];

pub const CONTACT_DETAILS: [ContactDetail; 3] = [
    ContactDetail {
        icon: "📧",
        text: "williamsvillavizar204@gmail.com",
    },
    ContactDetail {
        icon: "📱",
        text: "+1 (849) 653-1360",
    },
    ContactDetail {
        icon: "📍",
        text: "D.N., Rep. Dom.",
    },
];
