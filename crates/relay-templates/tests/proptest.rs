use proptest::{
    collection::{btree_map, btree_set, vec},
    prop_assert_eq, proptest,
};
use relay_templates::{MergeData, merge::render};

proptest! {
    #[test]
    fn test_every_tag_replaced(values in btree_map("[a-zA-Z][a-zA-Z0-9_]{0,8}", "[a-zA-Z0-9 .,]{1,12}", 1..6)) {
        let template: String = values.keys().map(|key| format!("{{{{{key}}}}}|")).collect();
        let expected: String = values.values().map(|value| format!("{value}|")).collect();
        let data: MergeData = values.into_iter().collect();

        prop_assert_eq!(render(&template, &data), expected);
    }

    #[test]
    fn test_falsy_tags_render_empty(keys in btree_set("[a-z]{1,8}", 1..6)) {
        let data: MergeData = keys.iter().map(|key| (key.clone(), false)).collect();
        let template: String = keys.iter().map(|key| format!("[{{{{{key}}}}}]")).collect();

        prop_assert_eq!(render(&template, &data), "[]".repeat(keys.len()));
    }

    #[test]
    fn test_plain_text_unchanged(text in "[^{}*\r\n]*") {
        prop_assert_eq!(render(&text, &MergeData::new()), text);
    }

    #[test]
    fn test_render_is_idempotent_without_tags(text in "[^{}*]*") {
        let data = MergeData::new();
        let once = render(&text, &data);
        prop_assert_eq!(render(&once, &data), once);
    }

    #[test]
    fn test_bold_pairs(words in vec("[a-zA-Z0-9 ]{1,12}", 1..4)) {
        let template = words.iter().map(|w| format!("**{w}**")).collect::<Vec<_>>().join(" ");
        let expected = words
            .iter()
            .map(|w| format!("<strong>{w}</strong>"))
            .collect::<Vec<_>>()
            .join(" ");

        prop_assert_eq!(render(&template, &MergeData::new()), expected);
    }
}
