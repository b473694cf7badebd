use crate::unicode::{classify, Category};

use super::Canonical;

/// Sort the marks of every cluster into canonical order.
///
/// A cluster is a Base codepoint followed by every codepoint whose category
/// is above Base. Its members are stably sorted by category, so two marks of
/// the same category keep their relative order. Marks found outside any
/// cluster are copied through and clear the `valid` flag.
pub fn reorder_clusters(text: &str) -> Canonical {
    let chars: Vec<char> = text.chars().collect();
    let cats: Vec<Category> = chars.iter().map(|&c| classify(c)).collect();
    let mut out = String::with_capacity(text.len());
    let mut valid = true;

    let mut i = 0;
    while i < chars.len() {
        if cats[i] != Category::Base {
            if cats[i] > Category::Base {
                valid = false;
            }
            out.push(chars[i]);
            i += 1;
            continue;
        }

        let end = cats[i + 1..]
            .iter()
            .position(|&cat| cat <= Category::Base)
            .map_or(chars.len(), |p| i + 1 + p);

        // sort_by_key is stable: ties keep string order
        let mut order: Vec<usize> = (i..end).collect();
        order.sort_by_key(|&k| cats[k]);
        out.extend(order.iter().map(|&k| chars[k]));
        i = end;
    }

    Canonical { text: out, valid }
}
