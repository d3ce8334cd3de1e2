// Copyright (C) 2025 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::path::Path;

use log::debug;
use serde::Deserialize;

use crate::{
    ArchitectureKind,
    CallingConvention,
    OperatingSystem,
    Platform,
    TargetError,
    TargetResult,
};

/// The contents of a `regmodel.toml` file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
#[serde(rename_all = "kebab-case")]
pub struct ConfigRoot {
    pub doel: ConfigSectionTarget,
    pub log: ConfigSectionLog,
}

impl ConfigRoot {
    pub fn parse(source: &str) -> TargetResult<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: &Path) -> TargetResult<Self> {
        let source = std::fs::read_to_string(path).map_err(|error| TargetError::ConfigurationNotReadable {
            path: path.to_path_buf(),
            error,
        })?;

        debug!("Configuratie gelezen uit {}", path.display());
        Self::parse(&source)
    }

    /// The configured platform, where every missing part is taken from the host.
    pub fn platform(&self) -> TargetResult<Platform> {
        let architecture = match &self.doel.architectuur {
            Some(name) => ArchitectureKind::parse(name)?,
            None => ArchitectureKind::host().ok_or(TargetError::UnknownHost)?,
        };

        let operating_system = match &self.doel.besturingssysteem {
            Some(name) => OperatingSystem::parse(name)?,
            None => OperatingSystem::host().ok_or(TargetError::UnknownHost)?,
        };

        Ok(Platform::new(architecture, operating_system))
    }

    pub fn calling_convention(&self) -> TargetResult<CallingConvention> {
        let Some(name) = &self.doel.aanroepconventie else {
            return Ok(CallingConvention::default());
        };

        name.parse().map_err(|_| TargetError::UnknownCallingConvention { name: name.clone() })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
#[serde(rename_all = "kebab-case")]
pub struct ConfigSectionTarget {
    pub architectuur: Option<String>,
    pub besturingssysteem: Option<String>,
    pub aanroepconventie: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
#[serde(rename_all = "kebab-case")]
pub struct ConfigSectionLog {
    pub debug: bool,
}
