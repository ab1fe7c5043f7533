//! Time-driven glow pulses and travelling waves along wire strands.

use std::f32::consts::PI;

use bevy::prelude::*;

/// Which material property a [`Pulse`] drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PulseChannel {
    /// Base colour alpha, clamped to [0, 1].
    Opacity,
    /// Scales the stored emissive colour.
    Emissive,
}

/// Staggered sine oscillator attached to a node with its own material.
#[derive(Component, Clone, Copy, Debug)]
pub struct Pulse {
    pub base: f32,
    pub amplitude: f32,
    pub frequency: f32,
    pub phase: f32,
    pub channel: PulseChannel,
}

impl Pulse {
    pub fn value(&self, time: f32) -> f32 {
        let raw = self.base + self.amplitude * (time * self.frequency + self.phase).sin();
        match self.channel {
            PulseChannel::Opacity => raw.clamp(0.0, 1.0),
            PulseChannel::Emissive => raw.max(0.0),
        }
    }
}

/// Emissive colour a [`PulseChannel::Emissive`] pulse scales every frame.
#[derive(Component, Clone, Copy, Debug)]
pub struct EmissiveBase(pub LinearRgba);

/// Undeformed vertex positions of a tube plus the wave that runs along it.
#[derive(Component, Clone, Debug)]
pub struct WireStrand {
    pub original: Vec<[f32; 3]>,
    pub arc: Vec<f32>,
    pub amplitude: f32,
    /// Waves along the full strand.
    pub waves: f32,
    /// Radians per second.
    pub speed: f32,
    pub phase: f32,
}

impl WireStrand {
    /// Positions for `time`, always derived from `original`. The wave is
    /// enveloped by `sin(pi * arc)` so both ends stay attached.
    pub fn wave_positions(&self, time: f32) -> Vec<[f32; 3]> {
        self.original
            .iter()
            .zip(&self.arc)
            .map(|(p, &u)| {
                let envelope = (PI * u).sin();
                let wave = (u * self.waves * 2.0 * PI - time * self.speed + self.phase).sin();
                [p[0], p[1] + self.amplitude * envelope * wave, p[2]]
            })
            .collect()
    }
}
