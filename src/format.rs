//! Canonical string format (C7): `partition := "[" block* "]"`,
//! `block := "[" element ("," element)* "]"`, elements separated by commas
//! and free of whitespace and commas themselves. Whitespace anywhere outside
//! a token is ignored on parse; the printer's block and within-block
//! ordering is unspecified, matching the Partition contract's set semantics.
//!
//! This codec is deliberately Partition-agnostic: it is built against
//! [`Partition`] alone and used by neither C2 nor C3 internally, so it never
//! constrains how either representation stores its blocks.

use std::hash::Hash;

use hashbrown::HashSet;

use crate::{
    error::{ParsePartitionError, PartitionError},
    partition::Partition,
};

/// Render `p` in the canonical format, using `element` to stringify each
/// element. Block and element ordering within the output is unspecified.
pub fn write_partition<T: Eq + Hash + Clone>(
    p: &impl Partition<T>,
    element: impl Fn(&T) -> String,
) -> String {
    let mut out = String::from("[");
    for (i, block) in p.subsets().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push('[');
        for (j, t) in block.iter().enumerate() {
            if j > 0 {
                out.push(',');
            }
            out.push_str(&element(t));
        }
        out.push(']');
    }
    out.push(']');
    out
}

/// Parse the canonical format into a `P`, deserializing each element token
/// with `deserialize` and materializing the result with `factory` (the same
/// two-argument factory shape as [`crate::adapter`]'s, so a caller can reuse
/// one factory closure across both entry points).
///
/// # Errors
/// Returns [`ParsePartitionError::Grammar`] if `s` does not match the
/// grammar or the parsed blocks violate the partition contract (a
/// duplicate element within or across blocks), and
/// [`ParsePartitionError::Element`] if `deserialize` fails on some token.
pub fn parse_partition<T, E, P>(
    s: &str,
    deserialize: impl Fn(&str) -> Result<T, E>,
    factory: impl FnOnce(&[T], &dyn Fn(&T) -> usize) -> P,
) -> Result<P, ParsePartitionError<E>>
where
    T: Eq + Hash + Clone,
    P: Partition<T>,
{
    let blocks = parse_blocks(s, &deserialize)?;
    let mut elements = Vec::new();
    let mut label_of: hashbrown::HashMap<T, usize> = hashbrown::HashMap::new();
    for (i, block) in blocks.into_iter().enumerate() {
        for t in block {
            label_of.insert(t.clone(), i);
            elements.push(t);
        }
    }
    Ok(factory(&elements, &|t| label_of[t]))
}

fn grammar_err<E>(msg: &'static str) -> ParsePartitionError<E> {
    ParsePartitionError::Grammar(PartitionError::ArgInvalid(msg))
}

fn parse_blocks<T, E>(
    s: &str,
    deserialize: &impl Fn(&str) -> Result<T, E>,
) -> Result<Vec<Vec<T>>, ParsePartitionError<E>>
where
    T: Eq + Hash + Clone,
{
    let cleaned: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.first() != Some(&'[') {
        return Err(grammar_err("partition must start with '['"));
    }
    let mut pos = 1usize;

    let mut blocks: Vec<Vec<T>> = Vec::new();
    if cleaned.get(pos) == Some(&']') {
        pos += 1;
    } else {
        loop {
            let (block, next) = parse_block(&cleaned, pos, deserialize)?;
            blocks.push(block);
            pos = next;
            match cleaned.get(pos) {
                Some(',') => pos += 1,
                Some(']') => {
                    pos += 1;
                    break;
                },
                _ => return Err(grammar_err("expected ',' or ']' after block")),
            }
        }
    }
    if pos != cleaned.len() {
        return Err(grammar_err("stray trailing characters after partition"));
    }

    let mut seen_overall = HashSet::new();
    for block in &blocks {
        if block.is_empty() {
            return Err(grammar_err("block must be non-empty"));
        }
        let mut seen_in_block = HashSet::new();
        for t in block {
            if !seen_in_block.insert(t.clone()) {
                return Err(grammar_err("duplicate element within a block"));
            }
            if !seen_overall.insert(t.clone()) {
                return Err(grammar_err("duplicate element across blocks"));
            }
        }
    }
    Ok(blocks)
}

fn parse_block<T, E>(
    cleaned: &[char],
    mut pos: usize,
    deserialize: &impl Fn(&str) -> Result<T, E>,
) -> Result<(Vec<T>, usize), ParsePartitionError<E>> {
    if cleaned.get(pos) != Some(&'[') {
        return Err(grammar_err("block must start with '['"));
    }
    pos += 1;
    let mut elems = Vec::new();
    if cleaned.get(pos) == Some(&']') {
        return Ok((elems, pos + 1));
    }
    loop {
        let start = pos;
        while !matches!(cleaned.get(pos), None | Some(',' | ']' | '[')) {
            pos += 1;
        }
        if pos == start {
            return Err(grammar_err("empty element token"));
        }
        let token: String = cleaned[start..pos].iter().collect();
        let t = deserialize(&token).map_err(ParsePartitionError::Element)?;
        elems.push(t);
        match cleaned.get(pos) {
            Some(',') => pos += 1,
            Some(']') => {
                pos += 1;
                break;
            },
            _ => return Err(grammar_err("expected ',' or ']' in block")),
        }
    }
    Ok((elems, pos))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::union_find::UnionFindPartition;

    fn deserialize_u32(s: &str) -> Result<u32, std::num::ParseIntError> { s.parse() }

    fn build(elements: &[u32], label: &dyn Fn(&u32) -> usize) -> UnionFindPartition<u32> {
        let mut blocks: Vec<Vec<u32>> = Vec::new();
        for &t in elements {
            let l = label(&t);
            if l >= blocks.len() {
                blocks.resize(l + 1, Vec::new());
            }
            blocks[l].push(t);
        }
        let mut p = UnionFindPartition::new();
        for block in blocks {
            if !block.is_empty() {
                p.add_subset(block).expect("freshly grouped blocks are disjoint");
            }
        }
        p
    }

    #[test]
    fn empty_string_round_trips() {
        let p: UnionFindPartition<u32> = parse_partition("[]", deserialize_u32, build).unwrap();
        assert_eq!(p.size(), 0);
        assert_eq!(write_partition(&p, |t| t.to_string()), "[]");
    }

    #[test]
    fn singleton_round_trips() {
        let p: UnionFindPartition<u32> = parse_partition("[[1]]", deserialize_u32, build).unwrap();
        assert_eq!(p.size(), 1);
        assert_eq!(p.subset_count(), 1);
    }

    #[test]
    fn ignores_outer_whitespace() {
        let p: UnionFindPartition<u32> =
            parse_partition(" [ [1, 2] , [3] ] ", deserialize_u32, build).unwrap();
        assert_eq!(p.size(), 3);
        assert_eq!(p.subset_count(), 2);
    }

    #[test]
    fn rejects_missing_outer_brackets() {
        let err = parse_partition::<u32, _, UnionFindPartition<u32>>("[1]", deserialize_u32, build);
        assert!(err.is_err());
    }

    #[test]
    fn rejects_duplicate_across_blocks() {
        let err = parse_partition::<u32, _, UnionFindPartition<u32>>(
            "[[1],[1]]",
            deserialize_u32,
            build,
        );
        assert!(matches!(err, Err(ParsePartitionError::Grammar(PartitionError::ArgInvalid(_)))));
    }

    #[test]
    fn rejects_duplicate_within_block() {
        let err = parse_partition::<u32, _, UnionFindPartition<u32>>(
            "[[1,1]]",
            deserialize_u32,
            build,
        );
        assert!(err.is_err());
    }

    #[test]
    fn rejects_empty_block() {
        let err =
            parse_partition::<u32, _, UnionFindPartition<u32>>("[[]]", deserialize_u32, build);
        assert!(err.is_err());
    }

    #[test]
    fn rejects_trailing_garbage() {
        let err = parse_partition::<u32, _, UnionFindPartition<u32>>(
            "[[1]]x",
            deserialize_u32,
            build,
        );
        assert!(err.is_err());
    }
}
