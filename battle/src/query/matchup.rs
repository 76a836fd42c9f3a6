//! Type matchup helpers

use crate::types::Type;

/// Attacking types that hit the defender for more than 1x, in chart order
pub fn weaknesses(defender_types: &[Type]) -> Vec<Type> {
    let mut weak: Vec<Type> = Type::all()
        .iter()
        .copied()
        .filter(|t| t.effectiveness_multi(defender_types) > 1.0)
        .collect();
    weak.sort();
    weak
}

/// Combined pressure of an attacker's types on a defender: the product of
/// every attacking type's multiplier against every defending type.
///
/// Typeless attackers or defenders are neutral (1.0).
pub fn type_pressure(attacker_types: &[Type], defender_types: &[Type]) -> f32 {
    attacker_types
        .iter()
        .map(|t| t.effectiveness_multi(defender_types))
        .product()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weaknesses() {
        let steel = vec![Type::Steel];
        assert_eq!(
            weaknesses(&steel),
            vec![Type::Fire, Type::Fighting, Type::Ground]
        );
    }

    #[test]
    fn test_weaknesses_dual_type() {
        // Water/Ground is only weak to Grass (4x)
        let swampert = vec![Type::Water, Type::Ground];
        assert_eq!(weaknesses(&swampert), vec![Type::Grass]);
    }

    #[test]
    fn test_weaknesses_of_unknown_types() {
        assert!(weaknesses(&[]).is_empty());
    }

    #[test]
    fn test_type_pressure() {
        // Fire/Flying into Grass/Bug: Fire 4x, Flying 4x
        assert_eq!(
            type_pressure(&[Type::Fire, Type::Flying], &[Type::Grass, Type::Bug]),
            16.0
        );
        // Electric into Ground
        assert_eq!(type_pressure(&[Type::Electric], &[Type::Ground]), 0.0);
        assert_eq!(type_pressure(&[], &[Type::Water]), 1.0);
        assert_eq!(type_pressure(&[Type::Water], &[]), 1.0);
    }
}
