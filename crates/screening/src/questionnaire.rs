//! Fixed questionnaire definitions.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ScreeningError;

/// Which instrument a questionnaire (and its threshold table) belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestKind {
    /// 9-item depression inventory.
    Phq9,
    /// 7-item anxiety inventory.
    Gad7,
}

impl TestKind {
    pub const ALL: [TestKind; 2] = [TestKind::Phq9, TestKind::Gad7];

    pub fn as_str(&self) -> &'static str {
        match self {
            TestKind::Phq9 => "phq9",
            TestKind::Gad7 => "gad7",
        }
    }

    pub fn questionnaire(&self) -> &'static Questionnaire {
        match self {
            TestKind::Phq9 => &PHQ9,
            TestKind::Gad7 => &GAD7,
        }
    }
}

impl core::fmt::Display for TestKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TestKind {
    type Err = ScreeningError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TestKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| ScreeningError::UnknownTest(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnswerOption {
    pub value: i64,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: &'static str,
    pub text: &'static str,
    pub options: &'static [AnswerOption],
}

impl Question {
    pub fn accepts(&self, value: i64) -> bool {
        self.options.iter().any(|o| o.value == value)
    }

    pub fn max_value(&self) -> i64 {
        self.options.iter().map(|o| o.value).max().unwrap_or(0)
    }
}

/// Ordered question list for one instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Questionnaire {
    pub kind: TestKind,
    pub title: &'static str,
    pub prompt: &'static str,
    pub questions: &'static [Question],
    /// Question whose non-zero answer calls for a safety follow-up.
    #[serde(skip)]
    pub safety_item: Option<&'static str>,
}

impl Questionnaire {
    /// Highest achievable total.
    pub fn max_total(&self) -> u32 {
        self.questions
            .iter()
            .map(|q| q.max_value().max(0) as u32)
            .sum()
    }

    pub fn question(&self, id: &str) -> Option<&'static Question> {
        self.questions.iter().find(|q| q.id == id)
    }
}

const FREQUENCY: &[AnswerOption] = &[
    AnswerOption { value: 0, label: "Not at all" },
    AnswerOption { value: 1, label: "Several days" },
    AnswerOption { value: 2, label: "More than half the days" },
    AnswerOption { value: 3, label: "Nearly every day" },
];

const RECALL_PROMPT: &str =
    "Over the last 2 weeks, how often have you been bothered by any of the following problems?";

const fn item(id: &'static str, text: &'static str) -> Question {
    Question {
        id,
        text,
        options: FREQUENCY,
    }
}

pub static PHQ9: Questionnaire = Questionnaire {
    kind: TestKind::Phq9,
    title: "PHQ-9 Depression Screening",
    prompt: RECALL_PROMPT,
    questions: &[
        item("phq1", "Little interest or pleasure in doing things"),
        item("phq2", "Feeling down, depressed, or hopeless"),
        item("phq3", "Trouble falling or staying asleep, or sleeping too much"),
        item("phq4", "Feeling tired or having little energy"),
        item("phq5", "Poor appetite or overeating"),
        item(
            "phq6",
            "Feeling bad about yourself or that you are a failure or have let yourself or your family down",
        ),
        item(
            "phq7",
            "Trouble concentrating on things, such as reading the newspaper or watching television",
        ),
        item(
            "phq8",
            "Moving or speaking so slowly that other people could have noticed. Or the opposite - being so fidgety or restless that you have been moving around a lot more than usual",
        ),
        item("phq9", "Thoughts that you would be better off dead, or of hurting yourself"),
    ],
    safety_item: Some("phq9"),
};

pub static GAD7: Questionnaire = Questionnaire {
    kind: TestKind::Gad7,
    title: "GAD-7 Anxiety Screening",
    prompt: RECALL_PROMPT,
    questions: &[
        item("gad1", "Feeling nervous, anxious, or on edge"),
        item("gad2", "Not being able to stop or control worrying"),
        item("gad3", "Worrying too much about different things"),
        item("gad4", "Trouble relaxing"),
        item("gad5", "Being so restless that it is hard to sit still"),
        item("gad6", "Becoming easily annoyed or irritable"),
        item("gad7", "Feeling afraid, as if something awful might happen"),
    ],
    safety_item: None,
};
