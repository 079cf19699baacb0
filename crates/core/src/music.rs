//! Built-in background-music library.
//!
//! Collaborators may submit either a direct audio URL or the id of one of
//! these curated tracks; ids are resolved to URLs before the job is queued.

use serde::Serialize;

/// One curated background track.
#[derive(Debug, Clone, Serialize)]
pub struct MusicTrack {
    pub id: &'static str,
    pub name: &'static str,
    pub url: &'static str,
    pub tag: &'static str,
}

/// The curated track list, in menu order.
pub const LIBRARY: &[MusicTrack] = &[
    MusicTrack {
        id: "epic_battle",
        name: "1. Shonen Battle (Epic Rock)",
        url: "https://incompetech.com/music/royalty-free/mp3-royaltyfree/Volatile%20Reaction.mp3",
        tag: "Action",
    },
    MusicTrack {
        id: "sad_emotional",
        name: "2. Sad Backstory (Piano/Violin)",
        url: "https://incompetech.com/music/royalty-free/mp3-royaltyfree/Sad%20Trio.mp3",
        tag: "Sad",
    },
    MusicTrack {
        id: "tension_suspense",
        name: "3. Plot Twist (Suspense)",
        url: "https://incompetech.com/music/royalty-free/mp3-royaltyfree/Oppressive%20Gloom.mp3",
        tag: "Mystery",
    },
    MusicTrack {
        id: "heroic_victory",
        name: "4. Hero Arrives (Orchestral)",
        url: "https://incompetech.com/music/royalty-free/mp3-royaltyfree/Heroic%20Age.mp3",
        tag: "Epic",
    },
    MusicTrack {
        id: "comedy_funny",
        name: "5. Funny Moments (Slice of Life)",
        url: "https://incompetech.com/music/royalty-free/mp3-royaltyfree/Monkeys%20Spinning%20Monkeys.mp3",
        tag: "Fun",
    },
    MusicTrack {
        id: "dark_villain",
        name: "6. Villain Theme (Dark/Creepy)",
        url: "https://incompetech.com/music/royalty-free/mp3-royaltyfree/Impact%20Moderato.mp3",
        tag: "Dark",
    },
    MusicTrack {
        id: "training_montage",
        name: "7. Training Arc (Upbeat)",
        url: "https://incompetech.com/music/royalty-free/mp3-royaltyfree/Take%20a%20Chance.mp3",
        tag: "Motivational",
    },
    MusicTrack {
        id: "japan_traditional",
        name: "8. Ancient Era (Shamisen/Koto)",
        url: "https://incompetech.com/music/royalty-free/mp3-royaltyfree/Ishikari%20Lore.mp3",
        tag: "Traditional",
    },
    MusicTrack {
        id: "lofi_chill",
        name: "9. Reading Mode (Lofi Hip Hop)",
        url: "https://incompetech.com/music/royalty-free/mp3-royaltyfree/Dream%20Culture.mp3",
        tag: "Chill",
    },
    MusicTrack {
        id: "horror_seinen",
        name: "10. Horror/Gore (Ambient)",
        url: "https://incompetech.com/music/royalty-free/mp3-royaltyfree/Giant%20Wyrm.mp3",
        tag: "Horror",
    },
    MusicTrack {
        id: "fast_paced",
        name: "11. Speed Lines (Fast Drum&Bass)",
        url: "https://incompetech.com/music/royalty-free/mp3-royaltyfree/Movement%20Proposition.mp3",
        tag: "Fast",
    },
    MusicTrack {
        id: "mystery_detective",
        name: "12. Investigation (Detective)",
        url: "https://incompetech.com/music/royalty-free/mp3-royaltyfree/I%20Knew%20a%20Guy.mp3",
        tag: "Jazz",
    },
    MusicTrack {
        id: "fantasy_adventure",
        name: "13. New World (Fantasy)",
        url: "https://incompetech.com/music/royalty-free/mp3-royaltyfree/Celtic%20Impulse.mp3",
        tag: "Adventure",
    },
    MusicTrack {
        id: "romance_cute",
        name: "14. Romance (Cute/Piano)",
        url: "https://incompetech.com/music/royalty-free/mp3-royaltyfree/Touching%20Moments%20Two.mp3",
        tag: "Romance",
    },
    MusicTrack {
        id: "ending_credits",
        name: "15. Emotional Ending (Finale)",
        url: "https://incompetech.com/music/royalty-free/mp3-royaltyfree/Sovereign.mp3",
        tag: "Ending",
    },
];

/// Resolve a submitted music reference to something the worker can fetch.
///
/// Direct URLs pass through untouched. Anything else is treated as a track
/// id; unknown ids also pass through, which the worker then ignores (it only
/// downloads `http(s)` references), yielding a silent video rather than an
/// error.
pub fn resolve_music_url(raw: &str) -> String {
    if raw.starts_with("http") {
        return raw.to_string();
    }
    LIBRARY
        .iter()
        .find(|track| track.id == raw)
        .map(|track| track.url.to_string())
        .unwrap_or_else(|| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_urls_pass_through() {
        let url = "https://cdn.example.com/theme.mp3";
        assert_eq!(resolve_music_url(url), url);
    }

    #[test]
    fn known_track_id_resolves_to_its_url() {
        let resolved = resolve_music_url("lofi_chill");
        assert!(resolved.starts_with("https://"));
        assert!(resolved.contains("Dream%20Culture"));
    }

    #[test]
    fn unknown_id_passes_through() {
        assert_eq!(resolve_music_url("no_such_track"), "no_such_track");
    }

    #[test]
    fn track_ids_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for track in LIBRARY {
            assert!(seen.insert(track.id), "duplicate id {}", track.id);
        }
    }
}
