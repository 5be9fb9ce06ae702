use chrono::{DateTime, Locale, TimeZone};
use serde::Deserialize;

use crate::horizon::Horizon;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "pt-BR")]
    PtBr,
    #[serde(rename = "en")]
    En,
}

/// User-facing strings for one language.
#[derive(Debug)]
pub struct Messages {
    pub locale: Locale,
    /// Long date, e.g. "sex, 16 de outubro".
    pub date_format: &'static str,
    pub invalid_title: &'static str,
    pub invalid_desc: &'static str,
    pub error_title: &'static str,
    pub no_tasks: &'static str,
    pub new_task: &'static str,
    pub desc_label: &'static str,
    pub date_label: &'static str,
    pub invalid_date: &'static str,
    titles: [&'static str; 4],
}

static PT_BR: Messages = Messages {
    locale: Locale::pt_BR,
    date_format: "%a, %-d de %B",
    invalid_title: "Dados inválidos",
    invalid_desc: "Descrição não informada",
    error_title: "Ops! Ocorreu um problema!",
    no_tasks: "Nenhuma tarefa",
    new_task: "Nova Tarefa",
    desc_label: "Descrição",
    date_label: "Data (AAAA-MM-DD)",
    invalid_date: "Data inválida",
    titles: ["Hoje", "Amanhã", "Semana", "Mês"],
};

static EN: Messages = Messages {
    locale: Locale::en_US,
    date_format: "%a, %B %-d",
    invalid_title: "Invalid data",
    invalid_desc: "Description not provided",
    error_title: "Oops! Something went wrong!",
    no_tasks: "No tasks",
    new_task: "New Task",
    desc_label: "Description",
    date_label: "Date (YYYY-MM-DD)",
    invalid_date: "Invalid date",
    titles: ["Today", "Tomorrow", "Week", "Month"],
};

impl Language {
    pub fn messages(self) -> &'static Messages {
        match self {
            Language::PtBr => &PT_BR,
            Language::En => &EN,
        }
    }
}

impl Messages {
    pub fn title(&self, horizon: Horizon) -> &'static str {
        match horizon {
            Horizon::Today => self.titles[0],
            Horizon::Tomorrow => self.titles[1],
            Horizon::Week => self.titles[2],
            Horizon::Month => self.titles[3],
        }
    }

    pub fn long_date<Tz: TimeZone>(&self, date: &DateTime<Tz>) -> String
    where
        Tz::Offset: std::fmt::Display,
    {
        date.format_localized(self.date_format, self.locale).to_string()
    }
}
