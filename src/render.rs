//! Argument reordering and final substitution.

use crate::error::ErrorKind;
use crate::format::{
    Arg,
    sprintf,
};
use crate::verb::{
    Verb,
    replace_verbs,
};

/// Renders `target_template` with `args`, which are given in origin verb order.
///
/// Arguments are moved to the target verb carrying the same spec and tag, tags
/// are stripped, and the result is formatted positionally.
///
/// # Errors
/// - [`ErrorKind::VerbCountMismatch`] when `args` does not have one entry per
///   argument-taking verb of both templates
/// - [`ErrorKind::TagMismatch`] when a target verb has no origin counterpart
pub fn render(
    target_template: &str,
    origin_verbs: &[Verb],
    target_verbs: &[Verb],
    args: &[Arg],
) -> Result<String, ErrorKind> {
    if args.is_empty() {
        return Ok(target_template.to_string());
    }

    let origin: Vec<&Verb> = origin_verbs.iter().filter(|verb| verb.takes_argument()).collect();
    let target: Vec<&Verb> = target_verbs.iter().filter(|verb| verb.takes_argument()).collect();

    if origin.len() != args.len() || target.len() != args.len() {
        tracing::debug!(
            args = args.len(),
            origin = origin.len(),
            target = target.len(),
            "Argument count differs from verb count"
        );
        return Err(ErrorKind::VerbCountMismatch {
            args: args.len(),
            origin: origin.len(),
            target: target.len(),
        });
    }

    let reordered = reorder_args(&origin, &target, args)?;
    let plain = replace_verbs(target_template, target_verbs, Verb::positional_spec);

    Ok(sprintf(&plain, &reordered))
}

/// Permutes `args` from origin verb order into target verb order.
///
/// Each origin verb is used at most once, so repeated identical verbs keep
/// their relative order. When the two sequences differ in order, every verb
/// must be tagged.
///
/// # Errors
/// [`ErrorKind::TagMismatch`] naming the first verb that cannot be placed.
pub fn reorder_args(
    origin: &[&Verb],
    target: &[&Verb],
    args: &[Arg],
) -> Result<Vec<Arg>, ErrorKind> {
    let in_order = origin.len() == target.len()
        && origin.iter().zip(target).all(|(o, t)| o.same_slot(t));
    if in_order {
        return Ok(args.to_vec());
    }

    if let Some(untagged) = origin.iter().chain(target).find(|verb| !verb.is_tagged()) {
        tracing::debug!(verb = %untagged.text, "Untagged verb in reordered strings");
        return Err(ErrorKind::TagMismatch { verb: untagged.text.clone() });
    }

    let mut taken = vec![false; origin.len()];
    let mut reordered = Vec::with_capacity(target.len());

    for verb in target {
        let matched = origin
            .iter()
            .zip(&taken)
            .position(|(candidate, used)| !used && candidate.same_slot(verb));

        let Some((position, arg)) = matched.and_then(|j| args.get(j).map(|arg| (j, arg))) else {
            tracing::debug!(verb = %verb.text, "No origin verb matches target verb");
            return Err(ErrorKind::TagMismatch { verb: verb.text.clone() });
        };

        if let Some(used) = taken.get_mut(position) {
            *used = true;
        }
        reordered.push(arg.clone());
    }

    Ok(reordered)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;
    use crate::verb::parse_verbs;

    fn render_pair(origin: &str, target: &str, args: &[Arg]) -> Result<String, ErrorKind> {
        render(target, &parse_verbs(origin), &parse_verbs(target), args)
    }

    #[rstest]
    fn reorders_by_tag() {
        let result = render_pair(
            "Welcome to %s#title, %s#name!",
            "%s#name, %s#title'ya hoşgeldiniz!",
            &[Arg::from("Yahoo"), Arg::from("Marissa")],
        );

        assert_that!(result, ok(eq("Marissa, Yahoo'ya hoşgeldiniz!")));
    }

    #[rstest]
    fn keeps_order_when_untagged_verbs_line_up() {
        let result =
            render_pair("%s has %d apples", "%s tiene %d manzanas", &[Arg::from("Ana"), Arg::from(3)]);

        assert_that!(result, ok(eq("Ana tiene 3 manzanas")));
    }

    #[rstest]
    fn repeated_tags_keep_relative_order() {
        let result = render_pair(
            "%s#item and %s#item by %s#who",
            "%s#who: %s#item, %s#item",
            &[Arg::from("tea"), Arg::from("cake"), Arg::from("Jo")],
        );

        assert_that!(result, ok(eq("Jo: tea, cake")));
    }

    #[rstest]
    fn tag_matching_includes_conversion_spec() {
        let result = render_pair(
            "%d#count files in %s#dir",
            "%s#dir: %04d#count",
            &[Arg::from(7), Arg::from("/tmp")],
        );

        assert_that!(result, err(eq(&ErrorKind::TagMismatch { verb: "%04d#count".to_string() })));
    }

    #[rstest]
    fn plus_terminator_is_stripped() {
        let result = render_pair(
            "%s#first %s#last",
            "%s#last+, %s#first",
            &[Arg::from("Ada"), Arg::from("Lovelace")],
        );

        assert_that!(result, ok(eq("Lovelace, Ada")));
    }

    #[rstest]
    fn explicit_index_is_part_of_the_slot() {
        let result = render_pair(
            "%1$s#a then %2$s#b",
            "%2$s#b then %1$s#a",
            &[Arg::from("x"), Arg::from("y")],
        );

        assert_that!(result, ok(eq("y then x")));
    }

    #[rstest]
    fn percent_escape_is_not_counted() {
        let result =
            render_pair("%d%% of %s#who", "%s#who: %d%%", &[Arg::from(40), Arg::from("users")]);

        assert_that!(result, err(anything()));

        let result = render_pair(
            "%d#share%% of %s#who",
            "%s#who: %d#share%%",
            &[Arg::from(40), Arg::from("users")],
        );

        assert_that!(result, ok(eq("users: 40%")));
    }

    #[rstest]
    fn no_args_returns_template_verbatim() {
        let result = render_pair("Hello %s#name", "Hola %s#name", &[]);

        assert_that!(result, ok(eq("Hola %s#name")));
    }

    #[rstest]
    #[case::too_few("%s#a %s#b", "%s#b %s#a", 1, (1, 2, 2))]
    #[case::too_many("%s#a", "%s#a", 2, (2, 1, 1))]
    #[case::target_has_more("%s#a", "%s#a %s#a", 1, (1, 1, 2))]
    fn verb_count_mismatch(
        #[case] origin: &str,
        #[case] target: &str,
        #[case] count: usize,
        #[case] expected: (usize, usize, usize),
    ) {
        let args: Vec<Arg> = (0..count).map(Arg::from).collect();

        let result = render_pair(origin, target, &args);

        let (args, origin, target) = expected;
        assert_that!(result, err(eq(&ErrorKind::VerbCountMismatch { args, origin, target })));
    }

    #[rstest]
    #[case::renamed_tag("%s#name", "%s#nom", "%s#nom")]
    #[case::untagged_reorder("%s %d", "%d %s", "%s")]
    #[case::partially_tagged("%s#name %d", "%d %s#name", "%d")]
    fn tag_mismatch(#[case] origin: &str, #[case] target: &str, #[case] verb: &str) {
        let args: Vec<Arg> = parse_verbs(origin).iter().map(|_| Arg::from(1)).collect();

        let result = render_pair(origin, target, &args);

        assert_that!(result, err(eq(&ErrorKind::TagMismatch { verb: verb.to_string() })));
    }

    #[rstest]
    fn rendered_output_has_no_tags() {
        let result = render_pair(
            "%s#a-b %d#c_d %.1f#e",
            "%.1f#e %s#a-b %d#c_d",
            &[Arg::from("x"), Arg::from(2), Arg::from(0.5)],
        )
        .unwrap();

        assert_that!(result, eq("0.5 x 2"));
        assert_that!(result, not(contains_substring("#")));
    }
}
