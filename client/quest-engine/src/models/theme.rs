use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::mission::{FeedbackCopy, NarrativeAssets, TransitionContent};

/// Hero the student picked on the character-selection screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Character {
    Qhapaq,
    Amaru,
    Killa,
}

/// Villain the student picked for the battle narrative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Villain {
    Corporatus,
    Toxicus,
    Shadowman,
}

impl FromStr for Character {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Qhapaq" => Ok(Character::Qhapaq),
            "Amaru" => Ok(Character::Amaru),
            "Killa" => Ok(Character::Killa),
            other => Err(format!("unknown character: {other}")),
        }
    }
}

impl FromStr for Villain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Corporatus" => Ok(Villain::Corporatus),
            "Toxicus" => Ok(Villain::Toxicus),
            "Shadowman" => Ok(Villain::Shadowman),
            other => Err(format!("unknown villain: {other}")),
        }
    }
}

/// Each villain escalates through three stages; missions cycle through
/// them by ordinal.
const STAGES: usize = 3;

impl Character {
    fn background_image(&self) -> &'static str {
        match self {
            Character::Qhapaq => "fondoQuiz/FondoQuiz-Qhapaq.png",
            Character::Amaru => "fondoQuiz/FondoQuiz-Amaru.png",
            Character::Killa => "fondoQuiz/FondoQuiz-Killa.png",
        }
    }

    fn character_image(&self) -> &'static str {
        match self {
            Character::Qhapaq => "images/chaman.png",
            Character::Amaru => "Personajes/Amaru1.png",
            Character::Killa => "Personajes/Guerrera.png",
        }
    }
}

impl Villain {
    fn stage_image(&self, stage: usize) -> String {
        let name = match self {
            Villain::Corporatus => "Corporatus",
            Villain::Toxicus => "Toxicus",
            Villain::Shadowman => "Shadowman",
        };
        format!("PersonajesQuiz/{name}/{name}Level-{}.png", stage + 1)
    }

    /// Shown instead of the villain when the answer was wrong.
    fn defeat_image(&self, stage: usize) -> String {
        match (self, stage) {
            (Villain::Corporatus, 0) => "PersonajesQuiz/Corporatus/CorporatusLevel-1.png".into(),
            (Villain::Corporatus, 1) => "PersonajesQuiz/Corporatus/CorporatusLevel-2.png".into(),
            (Villain::Corporatus, _) => "villanosBattle/Corporatus.png".into(),
            (Villain::Toxicus, _) => "villanosBattle/El Demonio de la Avidez.png".into(),
            (Villain::Shadowman, _) => "villanosBattle/Shadowman.png".into(),
        }
    }

    fn stage_title(&self, stage: usize) -> &'static str {
        match (self, stage) {
            (Villain::Corporatus, 0) => "Explorando la Naturaleza",
            (Villain::Corporatus, 1) => "Explorando el Espacio",
            (Villain::Corporatus, _) => "Explorando la Cultura Andina",
            (Villain::Toxicus, 0) => "Cuidando el Aire",
            (Villain::Toxicus, 1) => "Problemas Ambientales",
            (Villain::Toxicus, _) => "Océanos en Peligro",
            (Villain::Shadowman, 0) => "Sombra Ambiental",
            (Villain::Shadowman, 1) => "Acciones Positivas",
            (Villain::Shadowman, _) => "Cuidando el Agua",
        }
    }

    fn stage_description(&self, stage: usize) -> &'static str {
        match (self, stage) {
            (Villain::Corporatus, 0) => {
                "Prepárate para poner a prueba tus conocimientos."
            }
            (Villain::Corporatus, 1) => "Vamos a descubrir nuevos desafíos.",
            (Villain::Corporatus, _) => "Conoce la cosmovisión andina y sus símbolos.",
            (Villain::Toxicus, 0) => "Aprende sobre el aire que respiramos.",
            (Villain::Toxicus, 1) => "Descubre los efectos de la contaminación.",
            (Villain::Toxicus, _) => "Reflexiona sobre el impacto del plástico.",
            (Villain::Shadowman, 0) => "Aprende sobre el impacto de nuestras acciones.",
            (Villain::Shadowman, 1) => "Descubre cómo puedes ayudar al planeta.",
            (Villain::Shadowman, _) => "Reflexiona sobre la importancia del agua.",
        }
    }
}

/// The character/villain pair selected before the run. Produces the
/// narrative dressing for each mission; the engine treats the result as
/// opaque pass-through data.
#[derive(Debug, Clone, Copy)]
pub struct ThemeSelection {
    pub character: Character,
    pub villain: Villain,
}

impl ThemeSelection {
    pub fn new(character: Character, villain: Villain) -> Self {
        Self { character, villain }
    }

    pub fn dress(&self, ordinal: u32) -> NarrativeAssets {
        let stage = (ordinal.saturating_sub(1) as usize) % STAGES;
        let background = self.character.background_image().to_string();

        NarrativeAssets {
            background_image: background.clone(),
            character_image: self.character.character_image().to_string(),
            villain_image: self.villain.stage_image(stage),
            feedback: Some(FeedbackCopy {
                correct_image: self.character.character_image().to_string(),
                incorrect_image: self.villain.defeat_image(stage),
                correct_description: "¡Excelente trabajo! Sigue así para vencer al villano."
                    .to_string(),
                incorrect_description: "No te rindas, la siguiente misión te espera.".to_string(),
            }),
            transition: Some(TransitionContent {
                background_image: background,
                image: self.villain.stage_image(stage),
                title: self.villain.stage_title(stage).to_string(),
                description: self.villain.stage_description(stage).to_string(),
            }),
        }
    }
}

impl Default for ThemeSelection {
    fn default() -> Self {
        Self::new(Character::Qhapaq, Villain::Corporatus)
    }
}
