//! Skeleton compatibility between an animation and a character.
//!
//! Exporters often suffix duplicated bone names (`Hips_1`, `mixamorigHips_2`);
//! names are compared after stripping a trailing `_<digits>` suffix.

use rustc_hash::FxHashSet;
use uuid::Uuid;

/// Strips one trailing `_<digits>` suffix: `"mixamorigHips_1"` → `"mixamorigHips"`.
#[must_use]
pub fn normalize_bone_name(name: &str) -> &str {
    match name.rsplit_once('_') {
        Some((stem, digits)) if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) => {
            stem
        }
        _ => name,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkeletonCompatibility {
    /// At least one animated bone exists on the character.
    pub compatible: bool,
    /// Fraction of animated bones found on the character, in `[0, 1]`.
    pub confidence: f32,
    pub warnings: Vec<String>,
    /// Animated bones the character lacks.
    pub missing_bones: Vec<String>,
    /// Character bones the animation never touches.
    pub extra_bones: Vec<String>,
}

impl SkeletonCompatibility {
    #[must_use]
    pub fn evaluate<C, A>(character_bones: &[C], animation_bones: &[A]) -> Self
    where
        C: AsRef<str>,
        A: AsRef<str>,
    {
        let character: FxHashSet<&str> = character_bones
            .iter()
            .map(|b| normalize_bone_name(b.as_ref()))
            .collect();
        let animated: FxHashSet<&str> = animation_bones
            .iter()
            .map(|b| normalize_bone_name(b.as_ref()))
            .collect();

        let mut missing_bones: Vec<String> = animated
            .difference(&character)
            .map(|s| (*s).to_string())
            .collect();
        let mut extra_bones: Vec<String> = character
            .difference(&animated)
            .map(|s| (*s).to_string())
            .collect();
        missing_bones.sort_unstable();
        extra_bones.sort_unstable();

        let shared = animated.len() - missing_bones.len();
        let confidence = if animated.is_empty() {
            0.0
        } else {
            shared as f32 / animated.len() as f32
        };

        let mut warnings = Vec::new();
        if animated.is_empty() {
            warnings.push("animation targets no bones".to_string());
        } else if shared == 0 {
            warnings.push("no animated bone exists on the character".to_string());
        } else if !missing_bones.is_empty() {
            warnings.push(format!(
                "{} animated bones missing on the character",
                missing_bones.len()
            ));
        }

        Self {
            compatible: shared > 0,
            confidence,
            warnings,
            missing_bones,
            extra_bones,
        }
    }
}

/// Whether an uploaded animation should be offered for a character: either
/// it was imported together with that character, or it shares bones with it.
#[must_use]
pub fn is_selectable<C, A>(
    associated_character: Option<Uuid>,
    character_id: Uuid,
    character_bones: &[C],
    animation_bones: &[A],
) -> bool
where
    C: AsRef<str>,
    A: AsRef<str>,
{
    associated_character == Some(character_id)
        || SkeletonCompatibility::evaluate(character_bones, animation_bones).compatible
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_numeric_suffix_only() {
        assert_eq!(normalize_bone_name("mixamorigHips_1"), "mixamorigHips");
        assert_eq!(normalize_bone_name("Hips_22"), "Hips");
        assert_eq!(normalize_bone_name("Left_Arm"), "Left_Arm");
        assert_eq!(normalize_bone_name("Spine_"), "Spine_");
        assert_eq!(normalize_bone_name("Head"), "Head");
    }
}
