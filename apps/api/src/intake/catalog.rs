//! Closed option lists offered by the job-profile form.

use serde::Serialize;

/// Selector value that switches a field to free text.
pub const OTHER_OPTION: &str = "Outro (Digitar manualmente)";

pub const AREAS: &[&str] = &[
    "Engenharia de Software",
    "Dados & IA",
    "Infraestrutura/Cloud",
    "Produto/Design",
    "Comercial/Vendas",
];

pub const ROLES: &[&str] = &[
    "Backend Developer",
    "Frontend Developer",
    "Data Scientist",
    "Product Manager",
    "DevOps Engineer",
];

pub const SENIORITIES: &[&str] = &[
    "Estagiário",
    "Júnior",
    "Pleno",
    "Sênior",
    "Tech Lead",
    "Principal/Staff",
];

pub const HARD_SKILLS: &[&str] = &[
    "Python",
    "Java",
    "JavaScript",
    "React",
    "SQL",
    "AWS",
    "Docker",
    "Kubernetes",
    "Git",
    "Excel Avançado",
];

// Most requested behavioral skills in job postings.
pub const SOFT_SKILLS: &[&str] = &[
    "Comunicação Clara",
    "Trabalho em Equipe",
    "Liderança",
    "Resolução de Problemas",
    "Inteligência Emocional",
    "Adaptabilidade",
    "Pensamento Crítico",
    "Autogestão",
];

/// Everything a client needs to draw the form.
#[derive(Debug, Clone, Serialize)]
pub struct FieldCatalog {
    pub other_option: &'static str,
    pub areas: Vec<&'static str>,
    pub roles: Vec<&'static str>,
    pub seniorities: Vec<&'static str>,
    pub hard_skills: Vec<&'static str>,
    pub soft_skills: Vec<&'static str>,
}

impl FieldCatalog {
    pub fn new() -> Self {
        Self {
            other_option: OTHER_OPTION,
            areas: AREAS.to_vec(),
            roles: ROLES.to_vec(),
            seniorities: SENIORITIES.to_vec(),
            hard_skills: HARD_SKILLS.to_vec(),
            soft_skills: SOFT_SKILLS.to_vec(),
        }
    }
}

impl Default for FieldCatalog {
    fn default() -> Self {
        Self::new()
    }
}
