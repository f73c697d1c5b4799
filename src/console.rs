//! Developer-console diagnostics: the startup banner and the `hamburgem.*`
//! command set. Everything here is static text; the browser side prints it.

/// Global name the command facade is published under.
pub const CONSOLE_NAMESPACE: &str = "hamburgem";
/// Global name of the debug helpers.
pub const DEBUG_NAMESPACE: &str = "hamburgemCV";

const ACCENT: &str = "color: #7b5b25;";
const HEADING: &str = "color: #7b5b25; font-weight: bold;";

/// One console line, optionally styled through a `%c` directive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConsoleLine {
    pub text: String,
    pub css: Option<&'static str>,
}

impl ConsoleLine {
    fn plain(text: &str) -> Self {
        Self { text: text.to_owned(), css: None }
    }

    fn styled(text: &str, css: &'static str) -> Self {
        Self { text: text.to_owned(), css: Some(css) }
    }
}

// -----------------------------------------------------------------------------
// Datasets
// -----------------------------------------------------------------------------

pub const BANNER: &[(&str, &str)] = &[
    ("🚀 Hamburgem's CV loaded successfully!", "color: #7b5b25; font-size: 16px; font-weight: bold;"),
    ("💻 Ready to .build() something amazing together?", "color: #ffd700; font-size: 14px;"),
    ("📧 Contact: yassine.bouih@uit.ac.ma", "color: #cccccc; font-size: 12px;"),
    ("🎯 Try typing \"hamburgem.help()\" in the console!", "color: #00ff00; font-size: 12px;"),
];

pub const COMMANDS: &[(&str, &str)] = &[
    ("about", "Learn more about Hamburgem"),
    ("skills", "View technical skills"),
    ("projects", "See project portfolio"),
    ("contact", "Get contact information"),
    ("joke", "Get a programming joke"),
    ("motivate", "Get some motivation"),
];

pub const SKILLS: &[&str] = &[
    "Languages: Python (90%), JavaScript (85%), C (75%)",
    "Frameworks: Flask, React, Node.js",
    "AI/ML: NumPy, Pandas, Scikit-learn, NLTK",
    "Tools: Git, GitHub, VS Code, MongoDB",
];

pub const PROJECTS: &[&str] = &[
    "AutoMail - Email Automation System",
    "Online Multiplayer Chess Game (In Progress)",
    "Diabetes Prediction System",
    "Personal AI Assistant",
    "AI FAQ Chatbot",
];

pub const CONTACTS: &[(&str, &str)] = &[
    ("Email", "yassine.bouih@uit.ac.ma"),
    ("LinkedIn", "linkedin.com/in/hamburgem"),
    ("GitHub", "github.com/hamburgem"),
    ("Twitter", "@hamburgem"),
];

pub const JOKES: &[&str] = &[
    "Why do programmers prefer dark mode? Because light attracts bugs! 🐛",
    "How many programmers does it take to change a light bulb? None, that's a hardware problem! 💡",
    "Why don't programmers like nature? It has too many bugs! 🌿",
    "What do you call a programmer from Finland? Nerdic! 🇫🇮",
    "Why did the programmer quit his job? He didn't get arrays! 📊",
];

pub const MOTIVATIONS: &[&str] = &[
    "Every expert was once a beginner. Keep coding! 💪",
    "The best time to plant a tree was 20 years ago. The second best time is now. Start coding! 🌱",
    "Code is like humor. When you have to explain it, it's bad. Keep it simple! 😄",
    "The only way to do great work is to love what you do. Keep building! ❤️",
    "Success is not final, failure is not fatal: it is the courage to continue that counts. Keep pushing! 🚀",
];

// -----------------------------------------------------------------------------
// Commands
// -----------------------------------------------------------------------------

/// Output of each console command. `joke` and `motivate` take a random roll
/// from the caller so the selection stays deterministic here.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleCommands;

impl ConsoleCommands {
    pub fn banner(&self) -> Vec<ConsoleLine> {
        BANNER
            .iter()
            .map(|&(text, css)| ConsoleLine::styled(text, css))
            .collect()
    }

    pub fn help(&self) -> Vec<ConsoleLine> {
        let mut lines = vec![ConsoleLine::styled("Available commands:", HEADING)];
        lines.extend(COMMANDS.iter().map(|(name, what)| ConsoleLine {
            text: format!("{CONSOLE_NAMESPACE}.{name}() - {what}"),
            css: None,
        }));
        lines
    }

    pub fn about(&self) -> Vec<ConsoleLine> {
        vec![
            ConsoleLine::styled(
                "Hi! I'm Hamburgem, a passionate CS student and aspiring AI engineer from Morocco.",
                ACCENT,
            ),
            ConsoleLine::plain("I love building intelligent systems and solving real-world problems with code."),
            ConsoleLine::plain("Currently in my 4th year, exploring AI, ML, and web development."),
        ]
    }

    pub fn skills(&self) -> Vec<ConsoleLine> {
        let mut lines = vec![ConsoleLine::styled("Technical Skills:", HEADING)];
        lines.extend(SKILLS.iter().map(|s| ConsoleLine::plain(s)));
        lines
    }

    pub fn projects(&self) -> Vec<ConsoleLine> {
        let mut lines = vec![ConsoleLine::styled("Featured Projects:", HEADING)];
        lines.extend(PROJECTS.iter().enumerate().map(|(i, p)| ConsoleLine {
            text: format!("{}. {p}", i + 1),
            css: None,
        }));
        lines
    }

    pub fn contact(&self) -> Vec<ConsoleLine> {
        let mut lines = vec![ConsoleLine::styled("Get in Touch:", HEADING)];
        lines.extend(CONTACTS.iter().map(|(kind, value)| ConsoleLine {
            text: format!("{kind}: {value}"),
            css: None,
        }));
        lines
    }

    pub fn joke(&self, roll: usize) -> ConsoleLine {
        ConsoleLine::styled(pick(JOKES, roll), "color: #ffd700; font-style: italic;")
    }

    pub fn motivate(&self, roll: usize) -> ConsoleLine {
        ConsoleLine::styled(pick(MOTIVATIONS, roll), "color: #00ff00; font-weight: bold;")
    }
}

fn pick<'a>(items: &[&'a str], roll: usize) -> &'a str {
    items[roll % items.len()]
}
