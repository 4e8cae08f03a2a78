use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct GenerateRequest<'a> {
    pub contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
pub struct Content<'a> {
    pub parts: Vec<PartOut<'a>>,
}

#[derive(Debug, Serialize)]
pub struct PartOut<'a> {
    pub text: &'a str,
}

impl<'a> GenerateRequest<'a> {
    pub fn single(prompt: &'a str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![PartOut { text: prompt }],
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<PartIn>,
}

#[derive(Debug, Deserialize)]
pub struct PartIn {
    #[serde(default)]
    pub text: Option<String>,
}

impl GenerateResponse {
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Evaluation {
    pub evaluation: String,
    pub score: Option<u32>,
}
