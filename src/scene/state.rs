/// Target layout every animated group morphs toward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Arrangement {
    /// Assembled conical spiral
    #[default]
    Tree,
    /// Dispersed spherical cloud
    Scattered,
}

impl Arrangement {
    pub fn toggled(self) -> Self {
        match self {
            Arrangement::Tree => Arrangement::Scattered,
            Arrangement::Scattered => Arrangement::Tree,
        }
    }

    /// Progress value an animator converges to under this arrangement
    pub fn target(self) -> f32 {
        match self {
            Arrangement::Tree => 1.0,
            Arrangement::Scattered => 0.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Arrangement::Tree => "TREE",
            Arrangement::Scattered => "SCATTERED",
        }
    }
}

/// Process-wide arrangement. Animators only read it; `toggle` is the one writer.
#[derive(Debug, Clone, Default)]
pub struct SceneState {
    arrangement: Arrangement,
}

impl SceneState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arrangement(&self) -> Arrangement {
        self.arrangement
    }

    pub fn is_assembled(&self) -> bool {
        self.arrangement == Arrangement::Tree
    }

    /// Flip the arrangement unconditionally and return the new value
    pub fn toggle(&mut self) -> Arrangement {
        self.arrangement = self.arrangement.toggled();
        log::debug!("arrangement -> {}", self.arrangement.as_str());
        self.arrangement
    }
}
