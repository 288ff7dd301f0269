use std::collections::HashMap;

/// One row returned by the upstream table. Only the projected column is inspected.
#[derive(Debug, Clone, Default)]
pub struct Record {
    pub data: HashMap<String, serde_json::Value>,
}

impl Record {
    pub fn from_object(obj: serde_json::Map<String, serde_json::Value>) -> Self {
        Self {
            data: obj.into_iter().collect(),
        }
    }

    pub fn get(&self, column: &str) -> Option<&serde_json::Value> {
        self.data.get(column)
    }
}

/// The resume columns exposed over HTTP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResumeField {
    Summary,
    Tech,
    Experience,
    Projects,
}

impl ResumeField {
    pub const ALL: [ResumeField; 4] = [
        ResumeField::Summary,
        ResumeField::Tech,
        ResumeField::Experience,
        ResumeField::Projects,
    ];

    pub fn route_path(self) -> &'static str {
        match self {
            ResumeField::Summary => "/ResumeSummary/",
            ResumeField::Tech => "/ResumeTech/",
            ResumeField::Experience => "/ResumeExp/",
            ResumeField::Projects => "/ResumeProjects/",
        }
    }

    /// Column name in the upstream `resume` table.
    pub fn column(self) -> &'static str {
        match self {
            ResumeField::Summary => "Summary",
            ResumeField::Tech => "Tech",
            ResumeField::Experience => "exp",
            ResumeField::Projects => "Projects",
        }
    }

    pub fn not_found_message(self) -> &'static str {
        match self {
            ResumeField::Summary => "No summary found.",
            ResumeField::Tech => "No tech information found.",
            ResumeField::Experience => "No experience information found.",
            ResumeField::Projects => "No projects found.",
        }
    }
}

impl std::fmt::Display for ResumeField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ResumeField::Summary => "summary",
            ResumeField::Tech => "tech",
            ResumeField::Experience => "experience",
            ResumeField::Projects => "projects",
        };
        f.write_str(name)
    }
}
