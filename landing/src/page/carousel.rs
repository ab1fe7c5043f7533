//! Code-example carousel in the examples section.

use std::time::Duration;

use bevy::prelude::*;

use crate::page::sections::PageText;

pub const AUTO_ADVANCE: Duration = Duration::from_secs(6);

pub struct Slide {
    pub title: &'static str,
    pub code: &'static str,
}

pub const SLIDES: [Slide; 5] = [
    Slide {
        title: "Basic chat",
        code: r#"let mut agent = Agent::builder("BasicAgent")
    .config(config)
    .system_prompt("You are a helpful assistant.")
    .build()
    .await?;
agent.chat("Hello! How are you?").await?;"#,
    },
    Slide {
        title: "Custom tool",
        code: r#"let mut agent = Agent::builder("WeatherAgent")
    .config(config)
    .tool(Box::new(WeatherTool))
    .build()
    .await?;"#,
    },
    Slide {
        title: "In-memory RAG",
        code: r#"let rag_tool = RAGTool::new_in_memory(embeddings_url, api_key);
let mut agent = Agent::builder("KnowledgeAgent")
    .config(config)
    .tool(Box::new(rag_tool))
    .build()
    .await?;"#,
    },
    Slide {
        title: "Forest of agents",
        code: r#"let mut forest = ForestBuilder::new()
    .config(config)
    .agents(vec![
        ("coordinator".to_string(), Agent::builder("coordinator")),
        ("researcher".to_string(), Agent::builder("researcher")),
    ])
    .build()
    .await?;"#,
    },
    Slide {
        title: "Serve an agent",
        code: r#"helios_engine::serve::start_server_with_agent(
    agent,
    "local-model".to_string(),
    "127.0.0.1:8000",
).await?;"#,
    },
];

/// Which slide is showing, plus the auto-advance clock.
#[derive(Resource, Debug)]
pub struct Carousel {
    index: usize,
    len: usize,
    auto_advance: Timer,
}

impl Carousel {
    pub fn new(len: usize) -> Self {
        Self {
            index: 0,
            len,
            auto_advance: Timer::new(AUTO_ADVANCE, TimerMode::Repeating),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn next(&mut self) {
        if self.len > 0 {
            self.index = (self.index + 1) % self.len;
        }
        self.auto_advance.reset();
    }

    pub fn previous(&mut self) {
        if self.len > 0 {
            self.index = (self.index + self.len - 1) % self.len;
        }
        self.auto_advance.reset();
    }

    /// Moves forward once per elapsed auto-advance period. Returns whether
    /// the slide changed.
    pub fn tick(&mut self, delta: Duration) -> bool {
        self.auto_advance.tick(delta);
        let steps = self.auto_advance.times_finished_this_tick() as usize;
        if steps == 0 || self.len == 0 {
            return false;
        }
        let before = self.index;
        self.index = (self.index + steps) % self.len;
        self.index != before
    }
}

impl Default for Carousel {
    fn default() -> Self {
        Self::new(SLIDES.len())
    }
}

#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CarouselButton {
    Previous,
    Next,
}

#[derive(Component)]
pub struct SlideTitle;

#[derive(Component)]
pub struct SlideCode;

pub fn carousel_plugin(app: &mut App) {
    app.init_resource::<Carousel>().add_systems(
        Update,
        (carousel_buttons, auto_advance_carousel, refresh_slide).chain(),
    );
}

pub fn spawn_carousel(section: &mut ChildBuilder) {
    let first = &SLIDES[0];
    section
        .spawn(Node {
            width: Val::Percent(80.0),
            max_width: Val::Px(900.0),
            flex_direction: FlexDirection::Column,
            row_gap: Val::Px(12.0),
            padding: UiRect::all(Val::Px(24.0)),
            ..default()
        })
        .with_children(|card| {
            card.spawn((
                SlideTitle,
                PageText,
                Text::new(first.title),
                TextFont {
                    font_size: 26.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
            card.spawn((
                SlideCode,
                Text::new(first.code),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(1.0, 0.78, 0.45)),
            ));
            card.spawn(Node {
                column_gap: Val::Px(12.0),
                ..default()
            })
            .with_children(|row| {
                for (button, label) in [(CarouselButton::Previous, "<"), (CarouselButton::Next, ">")] {
                    row.spawn((
                        button,
                        Button,
                        Node {
                            width: Val::Px(44.0),
                            height: Val::Px(44.0),
                            justify_content: JustifyContent::Center,
                            align_items: AlignItems::Center,
                            ..default()
                        },
                        BackgroundColor(Color::srgba(1.0, 1.0, 1.0, 0.08)),
                    ))
                    .with_children(|button| {
                        button.spawn((PageText, Text::new(label), TextColor(Color::WHITE)));
                    });
                }
            });
        });
}

fn carousel_buttons(
    buttons: Query<(&Interaction, &CarouselButton), Changed<Interaction>>,
    mut carousel: ResMut<Carousel>,
) {
    for (interaction, button) in &buttons {
        if *interaction != Interaction::Pressed {
            continue;
        }
        match button {
            CarouselButton::Previous => carousel.previous(),
            CarouselButton::Next => carousel.next(),
        }
    }
}

fn auto_advance_carousel(time: Res<Time>, mut carousel: ResMut<Carousel>) {
    // only a slide change should trigger a text refresh
    if carousel.bypass_change_detection().tick(time.delta()) {
        carousel.set_changed();
    }
}

fn refresh_slide(
    carousel: Res<Carousel>,
    mut titles: Query<&mut Text, (With<SlideTitle>, Without<SlideCode>)>,
    mut codes: Query<&mut Text, (With<SlideCode>, Without<SlideTitle>)>,
) {
    if !carousel.is_changed() {
        return;
    }
    let Some(slide) = SLIDES.get(carousel.index()) else {
        return;
    };
    for mut text in &mut titles {
        text.0 = slide.title.to_string();
    }
    for mut text in &mut codes {
        text.0 = slide.code.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_wraps_both_ways() {
        let mut carousel = Carousel::new(3);
        carousel.previous();
        assert_eq!(carousel.index(), 2);
        carousel.next();
        assert_eq!(carousel.index(), 0);
    }

    #[test]
    fn auto_advance_fires_once_per_period() {
        let mut carousel = Carousel::new(SLIDES.len());
        assert!(!carousel.tick(AUTO_ADVANCE - Duration::from_millis(1)));
        assert!(carousel.tick(Duration::from_millis(1)));
        assert_eq!(carousel.index(), 1);
    }

    #[test]
    fn manual_navigation_restarts_the_clock() {
        let mut carousel = Carousel::new(SLIDES.len());
        carousel.tick(AUTO_ADVANCE - Duration::from_millis(10));
        carousel.next();
        assert!(!carousel.tick(Duration::from_millis(20)));
        assert_eq!(carousel.index(), 1);
    }

    #[test]
    fn empty_carousel_never_moves() {
        let mut carousel = Carousel::new(0);
        carousel.next();
        assert!(!carousel.tick(AUTO_ADVANCE * 3));
        assert_eq!(carousel.index(), 0);
    }
}
