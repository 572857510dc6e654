use crate::types::Style;

pub const STYLES: &[Style] = &[
    Style {
        id: "mid-century-modern",
        name: "Mid-Century Modern",
        description: "Clean lines, organic forms, and high functionality.",
        prompt: "Reimagine this room in a Mid-Century Modern style. Feature clean lines, gentle organic curves, and a mix of natural and manmade materials. Incorporate iconic furniture pieces with tapered legs. Use a color palette of warm neutrals, with pops of earthy greens, oranges, and blues.",
    },
    Style {
        id: "scandinavian",
        name: "Scandinavian",
        description: "Simplicity, minimalism, and functionality.",
        prompt: "Transform this room with a Scandinavian design. Focus on simplicity, minimalism, and functionality. Use a light, neutral color palette with white walls, light wood floors, and touches of gray and black. Maximize natural light and incorporate cozy textiles like wool and linen.",
    },
    Style {
        id: "bohemian",
        name: "Bohemian",
        description: "Carefree, unconventional, and artistic.",
        prompt: "Redesign this room with a Bohemian flair. Create a layered, eclectic look with a mix of patterns, textures, and colors. Incorporate vintage furniture, houseplants, and globally-inspired textiles like tapestries and rugs. The atmosphere should be carefree, relaxed, and artistic.",
    },
    Style {
        id: "industrial",
        name: "Industrial",
        description: "Raw, unfinished look with exposed elements.",
        prompt: "Give this room an Industrial style makeover. Expose structural elements like brick walls, ductwork, and pipes. Use a neutral color scheme of gray, black, and white. Incorporate materials like weathered wood, metal, and concrete. Furniture should be functional with a raw, unfinished feel.",
    },
    Style {
        id: "coastal",
        name: "Coastal",
        description: "Light, airy, and inspired by the beach.",
        prompt: "Convert this space into a Coastal-themed room. Create a light and airy feel with a color palette inspired by the sea: soft whites, blues, and sandy beiges. Use natural materials like light-colored wood, rattan, and linen. Decorate with nautical or beach-inspired accents.",
    },
    Style {
        id: "minimalist",
        name: "Minimalist",
        description: "Stripped-down, neutral, and clutter-free.",
        prompt: "Reimagine this room with a minimalist design. Strip everything down to its essential quality. Use a monochromatic color palette, clean lines, and simple forms. The space should be clutter-free, well-lit, and functional, with every object having a clear purpose.",
    },
];

/// Material categories offered by the customizer, each with its options.
pub const CUSTOMIZATIONS: &[(&str, &[&str])] = &[
    (
        "Flooring",
        &["Light Oak", "Walnut", "Polished Concrete", "Marble Tile", "Herringbone Parquet"],
    ),
    (
        "Wall Color",
        &["Warm White", "Sage Green", "Navy Blue", "Terracotta", "Charcoal"],
    ),
    (
        "Countertops",
        &["White Quartz", "Butcher Block", "Black Granite", "Terrazzo"],
    ),
    (
        "Upholstery",
        &["Linen", "Velvet", "Leather", "Boucle"],
    ),
    (
        "Lighting",
        &["Brass Pendants", "Paper Lanterns", "Track Lighting", "Warm Sconces"],
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_ids_are_unique() {
        for (i, style) in STYLES.iter().enumerate() {
            assert!(STYLES[i + 1..].iter().all(|other| other.id != style.id));
        }
    }

    #[test]
    fn test_every_category_offers_distinct_options() {
        for (category, options) in CUSTOMIZATIONS {
            assert!(!options.is_empty(), "{category} has no options");
            for (i, option) in options.iter().enumerate() {
                assert!(!options[i + 1..].contains(option), "{category}: {option} repeated");
            }
        }
    }
}
