/// What the presence service displays for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub image_key: String,
    pub details: String,
    pub state: String,
}

impl Activity {
    /// Shown while on the console's home screen
    pub fn idle() -> Self {
        Self {
            image_key: "home".to_string(),
            details: "Home".to_string(),
            state: "Idle".to_string(),
        }
    }

    /// Playing `title`; the image key defaults to the title itself.
    pub fn playing(title: &str, status: &str, image_key: Option<&str>) -> Self {
        Self {
            image_key: image_key.unwrap_or(title).to_string(),
            details: title.to_string(),
            state: title_case(status),
        }
    }
}

/// Upper-case the first letter of each word and lower-case the rest.
/// Apostrophes and underscores stay inside a word, as does a period between
/// two letters, so "don't" becomes "Don't" and "e.g." becomes "E.g.".
pub fn title_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;

    for (i, &c) in chars.iter().enumerate() {
        if c.is_alphanumeric() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
            continue;
        }

        out.push(c);
        at_word_start = match c {
            '\'' | '\u{2019}' | '_' => false,
            '.' => {
                let after_letter = i > 0 && chars[i - 1].is_alphanumeric();
                let before_letter = chars.get(i + 1).is_some_and(|n| n.is_alphanumeric());
                !(after_letter && before_letter)
            }
            _ => true,
        };
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_words() {
        assert_eq!(title_case("online"), "Online");
        assert_eq!(title_case("PLAYING with FRIENDS"), "Playing With Friends");
        assert_eq!(title_case("co-op  mode"), "Co-Op  Mode");
        assert_eq!(title_case("don't STOP"), "Don't Stop");
        assert_eq!(title_case("élan vital"), "Élan Vital");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn title_case_keeps_joined_words_together() {
        assert_eq!(title_case("foo_bar"), "Foo_bar");
        assert_eq!(title_case("e.g."), "E.g.");
        assert_eq!(title_case("v1.2 beta"), "V1.2 Beta");
        assert_eq!(title_case("done. next"), "Done. Next");
    }

    #[test]
    fn playing_defaults_image_key_to_title() {
        let activity = Activity::playing("Splatoon 3", "in a match", None);
        assert_eq!(activity.image_key, "Splatoon 3");
        assert_eq!(activity.details, "Splatoon 3");
        assert_eq!(activity.state, "In A Match");

        let activity = Activity::playing("Splatoon 3", "idle", Some("spl3"));
        assert_eq!(activity.image_key, "spl3");
    }
}
