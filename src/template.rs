//! Default production checklist template.
//!
//! Every new project is seeded with these tasks. The text is product
//! data: it matches what existing stores already contain, so edits here
//! would make old and new projects disagree.

/// Default checklist, one `(category, tasks)` entry per department in
/// display order. 37 tasks across 7 categories.
pub const DEFAULT_TEMPLATE: &[(&str, &[&str])] = &[
    (
        "Set Design",
        &[
            "Finalize set design concept",
            "Create technical drawings",
            "Source materials and props",
            "Build set pieces",
            "Paint and finish set",
            "Install set on stage/location",
        ],
    ),
    (
        "Costumes",
        &[
            "Finalize costume designs",
            "Take actor measurements",
            "Source fabrics and materials",
            "Construct costumes",
            "Schedule fittings",
            "Complete alterations",
        ],
    ),
    (
        "Lighting",
        &[
            "Create lighting plot",
            "Hang and circuit lights",
            "Program cues",
            "Focus lights",
            "Run lighting tests",
        ],
    ),
    (
        "Sound",
        &[
            "Design soundscape",
            "Source sound effects",
            "Record dialogue if needed",
            "Set up sound system",
            "Program sound cues",
        ],
    ),
    (
        "Rehearsal",
        &[
            "Blocking rehearsals",
            "Line rehearsals",
            "Technical rehearsals",
            "Dress rehearsals",
            "Final run-through",
        ],
    ),
    (
        "Production",
        &[
            "Finalize script",
            "Cast actors",
            "Schedule production meetings",
            "Coordinate with department heads",
            "Create production timeline",
        ],
    ),
    (
        "Marketing",
        &[
            "Design posters and programs",
            "Create social media campaign",
            "Press releases",
            "Ticket sales setup",
            "Opening night preparations",
        ],
    ),
];

/// Total number of tasks in the default template.
#[must_use]
pub fn template_len() -> usize {
    DEFAULT_TEMPLATE.iter().map(|(_, tasks)| tasks.len()).sum()
}
