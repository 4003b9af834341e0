//! Career rule table (B.Tech)
//!
//! Every career starts at 0. Common signals move all careers together,
//! per-career signals add on top. Highest score wins, first declared on
//! ties; a best score <= 0 falls back to Software Engineer.

use crate::logic::normalize::ResolvedAttributes;

pub const AI_ML: &str = "AI/ML Engineer";
pub const SOFTWARE: &str = "Software Engineer";
pub const WEB: &str = "Web Developer";
pub const DATA: &str = "Data Analyst";
pub const DEVOPS: &str = "DevOps Engineer";
pub const SECURITY: &str = "Cyber Security Engineer";

/// Declaration order is the tie-break order
const CAREERS: [&str; 6] = [AI_ML, SOFTWARE, WEB, DATA, DEVOPS, SECURITY];

const ML_STACK: &[&str] = &["numpy", "pandas", "tensorflow", "pytorch", "sklearn"];
const SYSTEMS_LANGS: &[&str] = &["java", "c++", "c#", "golang"];
const WEB_STACK: &[&str] = &[
    "html", "css", "javascript", "react", "angular", "vue", "django", "node", "next.js", "express",
];
const BI_TOOLS: &[&str] = &["excel", "power bi", "tableau", "sql"];
const DATA_LIBS: &[&str] = &["numpy", "pandas"];
const OPS_STACK: &[&str] = &[
    "devops", "docker", "kubernetes", "k8s", "aws", "azure", "gcp", "jenkins", "ci/cd", "cloud",
];
const SECURITY_STACK: &[&str] = &[
    "security", "cyber", "network", "penetration testing", "ethical hacking", "kali",
];

/// Signals read from one student
struct Signals {
    dsa: f64,
    dbms: f64,
    cgpa: f64,
    repos: f64,
    commits: f64,
    coding: f64,
    aptitude: f64,
    backlogs: f64,
    reappears: f64,
    attendance: f64,
    english: f64,
    frameworks: Vec<String>,
    proficiency: String,
}

impl Signals {
    fn read(resolved: &ResolvedAttributes) -> Self {
        Self {
            dsa: resolved.number("Data_Structures_And_Algorithm_Marks"),
            dbms: resolved.number("DBMS_Marks"),
            cgpa: resolved.number("CGPA"),
            repos: resolved.number("GitHub_total_repositories"),
            commits: resolved.number("GitHub_commits_per_month"),
            coding: resolved.number("Coding_practice_hours_per_week"),
            aptitude: resolved.number("Aptitude_score"),
            backlogs: resolved.number("Number_of_backlogs"),
            reappears: resolved.number("Number_of_Reappears"),
            attendance: resolved.number("Attandance"),
            english: english_score(&resolved.text("English_proficiency")),
            frameworks: split_frameworks(&resolved.text("Experience_with_frameworks")),
            proficiency: resolved.text("Programming_proficiency").to_lowercase(),
        }
    }

    fn knows_any(&self, stack: &[&str]) -> bool {
        self.frameworks.iter().any(|f| stack.contains(&f.as_str()))
    }

    fn knows(&self, name: &str) -> bool {
        self.frameworks.iter().any(|f| f == name)
    }
}

/// Dropdown text to a 0-100 scale, "fair" when unrecognised
fn english_score(level: &str) -> f64 {
    match level.trim().to_lowercase().as_str() {
        "poor" => 40.0,
        "good" => 80.0,
        "excellent" => 95.0,
        _ => 60.0,
    }
}

/// `a, b; c` -> ["a", "b", "c"], lower-cased
fn split_frameworks(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split([',', ';'])
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(str::to_string)
        .collect()
}

/// Per-career scores in declaration order
#[derive(Debug, Clone, PartialEq)]
pub struct CareerScores {
    pub scores: [(&'static str, i32); 6],
}

impl CareerScores {
    pub fn compute(resolved: &ResolvedAttributes) -> Self {
        let s = Signals::read(resolved);
        let mut scores = CAREERS.map(|c| (c, 0));

        // Common signals
        let mut common = 0;
        if s.cgpa >= 8.0 {
            common += 1;
        }
        if s.cgpa >= 8.5 {
            common += 1;
        }
        if s.backlogs > 0.0 || s.reappears > 0.0 {
            common -= 1;
        }
        if s.backlogs >= 3.0 || s.reappears >= 3.0 {
            common -= 1;
        }
        if s.attendance < 70.0 {
            common -= 1;
        }
        if s.english >= 70.0 {
            common += 1;
        }
        if s.aptitude >= 70.0 {
            common += 1;
        }
        for (_, score) in scores.iter_mut() {
            *score += common;
        }

        let bonus = |hit: bool, points: i32| if hit { points } else { 0 };

        scores[0].1 += bonus(s.dsa >= 80.0, 1)
            + bonus(s.knows("python"), 1)
            + bonus(s.knows_any(ML_STACK), 2)
            + bonus(s.coding >= 8.0, 1)
            + bonus(s.aptitude >= 85.0 && s.cgpa >= 8.5 && s.dsa >= 85.0, 2);

        scores[1].1 += bonus(s.dsa >= 75.0, 2)
            + bonus(s.coding >= 10.0, 2)
            + bonus(s.repos >= 2.0, 1)
            + bonus(s.commits >= 4.0, 1)
            + bonus(s.knows_any(SYSTEMS_LANGS), 1)
            + bonus(s.proficiency.contains("advanced") || s.proficiency.contains("intermediate"), 1);

        scores[2].1 += bonus(s.knows_any(WEB_STACK), 2)
            + bonus(s.coding >= 6.0, 1)
            + bonus(s.repos >= 2.0, 1)
            + bonus(s.commits >= 4.0, 1);

        scores[3].1 += bonus(s.dbms >= 75.0, 2)
            + bonus(s.aptitude >= 65.0, 1)
            + bonus(s.knows_any(BI_TOOLS), 2)
            + bonus(s.knows_any(DATA_LIBS), 1)
            + bonus(s.coding >= 4.0, 1);

        scores[4].1 += bonus(s.knows_any(OPS_STACK), 3)
            + bonus(s.repos >= 2.0, 1)
            + bonus(s.commits >= 5.0, 1)
            + bonus(s.aptitude >= 70.0, 1);

        scores[5].1 += bonus(s.knows_any(SECURITY_STACK), 3)
            + bonus(s.proficiency.contains("security") || s.proficiency.contains("cyber"), 2)
            + bonus(s.aptitude >= 70.0, 1);

        Self { scores }
    }

    pub fn score(&self, career: &str) -> Option<i32> {
        self.scores.iter().find(|(c, _)| *c == career).map(|(_, s)| *s)
    }

    /// Highest scoring career, first declared on ties
    pub fn best(&self) -> (&'static str, i32) {
        self.scores
            .iter()
            .copied()
            .fold(self.scores[0], |best, cur| if cur.1 > best.1 { cur } else { best })
    }
}

/// Career label for one B.Tech student
pub fn recommend_career(resolved: &ResolvedAttributes) -> &'static str {
    let (career, score) = CareerScores::compute(resolved).best();
    if score <= 0 {
        return SOFTWARE;
    }
    career
}
