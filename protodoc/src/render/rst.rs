//! reStructuredText rendering of a single option message.

use crate::model::DocumentedGroup;

/// Render one group as a titled section.
///
/// The block ends with the blank line following the last field (or trailing
/// comment), without an extra newline after it.
pub fn render_group(group: &DocumentedGroup) -> String {
    let mut lines: Vec<String> = vec![
        group.name.clone(),
        "=".repeat(group.name.chars().count()),
        String::new(),
    ];

    if !group.preceding.is_empty() {
        lines.extend(group.preceding.iter().cloned());
        lines.push(String::new());
    }

    for field in &group.fields {
        lines.push(field.name.clone());
        lines.extend(field.description.iter().map(|line| format!("  {line}")));
        lines.push(String::new());
    }

    if !group.trailing.is_empty() {
        lines.extend(group.trailing.iter().cloned());
        lines.push(String::new());
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Field;

    #[test]
    fn renders_trajectory_example() {
        let mut group =
            DocumentedGroup::new("proto.demo.Trajectory".into(), vec!["Speed in meters.".into()]);
        group
            .fields
            .push(Field::new("speed".into(), "double".into(), vec![]));

        assert_eq!(
            render_group(&group),
            "proto.demo.Trajectory\n\
             =====================\n\
             \n\
             Speed in meters.\n\
             \n\
             speed\n  Not yet documented.\n"
        );
    }

    #[test]
    fn empty_group_is_just_a_heading() {
        let group = DocumentedGroup::new("a.X".into(), vec![]);
        assert_eq!(render_group(&group), "a.X\n===\n");
    }

    #[test]
    fn multi_line_descriptions_are_indented() {
        let mut group = DocumentedGroup::new("a.X".into(), vec![]);
        group.fields.push(Field::new(
            "range".into(),
            "float".into(),
            vec!["Max range.".into(), "In meters.".into()],
        ));
        group.trailing = vec!["See also b.Y.".into()];

        assert_eq!(
            render_group(&group),
            "a.X\n===\n\nrange\n  Max range.\n  In meters.\n\nSee also b.Y.\n"
        );
    }

    #[test]
    fn underline_counts_characters_not_bytes() {
        let group = DocumentedGroup::new("a.Größe".into(), vec![]);
        let rendered = render_group(&group);
        assert_eq!(rendered.lines().nth(1), Some("======="));
    }
}
