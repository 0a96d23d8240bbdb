//! Parsing of element expressions, inverse to the `Display` form:
//! `"McdJ[2, 1] + (q*t^2 - 1)*McdJ[1, 1, 1]"`.
//!
//! Coefficients support `q`, `t`, integers, `+ - * / ^` and parentheses;
//! basis vectors are a family prefix followed by a bracketed part list.

use nom::{
    branch::alt,
    character::complete::{char, digit1, one_of, space0},
    combinator::{all_consuming, map, map_res, opt, recognize, value},
    error::{Error as NomError, ErrorKind, ParseError},
    multi::separated_list0,
    sequence::{delimited, pair, tuple},
    IResult as IResultBase, Parser,
};
use partitions::Partition;
use qt::Scalar;
use symfunc::Expansion;

use crate::error::{Error, Result};
use crate::family::McdBasis;

type IResult<'a, O> = IResultBase<&'a str, O, NomError<&'a str>>;

/// Pad both ends with whitespace.
fn space<'a, O, E: ParseError<&'a str>, F: Parser<&'a str, O, E>>(
    f: F,
) -> impl FnMut(&'a str) -> IResultBase<&'a str, O, E> {
    delimited(space0, f, space0)
}

fn integer(i: &str) -> IResult<i64> {
    map_res(recognize(pair(opt(char('-')), digit1)), str::parse)(i)
}

fn part_size(i: &str) -> IResult<u32> {
    map_res(digit1, str::parse)(i)
}

fn partition(i: &str) -> IResult<Partition> {
    map(
        delimited(
            space(char('[')),
            separated_list0(space(char(',')), part_size),
            space(char(']')),
        ),
        Partition::from_unsorted,
    )(i)
}

fn basis_tag(i: &str) -> IResult<McdBasis> {
    use nom::bytes::complete::tag;
    alt((
        value(McdBasis::Ht, tag("McdHt")),
        value(McdBasis::P, tag("McdP")),
        value(McdBasis::Q, tag("McdQ")),
        value(McdBasis::J, tag("McdJ")),
        value(McdBasis::H, tag("McdH")),
        value(McdBasis::S, tag("McdS")),
        value(McdBasis::Ht, tag("Ht")),
        value(McdBasis::P, tag("P")),
        value(McdBasis::Q, tag("Q")),
        value(McdBasis::J, tag("J")),
        value(McdBasis::H, tag("H")),
        value(McdBasis::S, tag("S")),
    ))(i)
}

fn basis_elt(i: &str) -> IResult<(McdBasis, Partition)> {
    pair(basis_tag, partition)(i)
}

fn scalar_factor(i: &str) -> IResult<Scalar> {
    let (i, base) = alt((
        value(Scalar::q(), char('q')),
        value(Scalar::t(), char('t')),
        map(integer, Scalar::int),
        delimited(space(char('(')), scalar_expr, space(char(')'))),
    ))(i)?;
    match space::<_, NomError<&str>, _>(char('^'))(i) {
        Ok((rest, _)) => {
            let (rest, exp) = integer(rest)?;
            if base.is_zero() && exp < 0 {
                return Err(nom::Err::Failure(NomError::from_error_kind(
                    i,
                    ErrorKind::Verify,
                )));
            }
            Ok((rest, base.pow(exp)))
        }
        Err(_) => Ok((i, base)),
    }
}

fn scalar_term(input: &str) -> IResult<Scalar> {
    let (mut i, mut acc) = scalar_factor(input)?;
    loop {
        let Ok((after_op, op)) = space::<_, NomError<&str>, _>(one_of("*/"))(i) else {
            break;
        };
        // A factor that fails to parse after the operator means the
        // operator belongs to the surrounding element grammar; back off.
        match scalar_factor(after_op) {
            Ok((rest, factor)) => {
                acc = match op {
                    '*' => &acc * &factor,
                    _ => match acc.checked_div(&factor) {
                        Some(v) => v,
                        None => {
                            return Err(nom::Err::Failure(NomError::from_error_kind(
                                after_op,
                                ErrorKind::Verify,
                            )))
                        }
                    },
                };
                i = rest;
            }
            Err(_) => break,
        }
    }
    Ok((i, acc))
}

fn scalar_expr(input: &str) -> IResult<Scalar> {
    let (i, neg) = opt(space(char('-')))(input)?;
    let (mut i, mut acc) = scalar_term(i)?;
    if neg.is_some() {
        acc = -acc;
    }
    loop {
        let Ok((after_op, op)) = space::<_, NomError<&str>, _>(one_of("+-"))(i) else {
            break;
        };
        let (rest, term) = scalar_term(after_op)?;
        acc = if op == '+' { &acc + &term } else { &acc - &term };
        i = rest;
    }
    Ok((i, acc))
}

/// One summand: a coefficient and, unless the term is a bare scalar, a
/// tagged basis vector.
type Term = (Scalar, Option<(McdBasis, Partition)>);

fn element_term(i: &str) -> IResult<Term> {
    alt((
        map(
            tuple((scalar_term, space(char('*')), basis_elt)),
            |(c, _, elt)| (c, Some(elt)),
        ),
        map(basis_elt, |elt| (Scalar::one(), Some(elt))),
        map(scalar_term, |c| (c, None)),
    ))(i)
}

fn element_terms(input: &str) -> IResult<Vec<Term>> {
    let (i, neg) = opt(space(char('-')))(input)?;
    let (mut i, first) = element_term(i)?;
    let mut terms = vec![if neg.is_some() {
        (-first.0, first.1)
    } else {
        first
    }];
    loop {
        let Ok((after_op, op)) = space::<_, NomError<&str>, _>(one_of("+-"))(i) else {
            break;
        };
        let (rest, (coeff, elt)) = element_term(after_op)?;
        terms.push(if op == '-' { (-coeff, elt) } else { (coeff, elt) });
        i = rest;
    }
    Ok((i, terms))
}

/// Parse a full element expression. The basis tag is `None` when the
/// expression contains no basis vector at all (a bare scalar, which is
/// read as a multiple of the empty-partition vector).
pub(crate) fn element(input: &str) -> Result<(Option<McdBasis>, Expansion)> {
    let (_, terms) = all_consuming(space(element_terms))(input)
        .map_err(|e| Error::Parse(e.to_string()))?;
    let mut kind = None;
    let mut coeffs = Expansion::zero();
    for (coeff, elt) in terms {
        match elt {
            Some((basis, part)) => {
                if *kind.get_or_insert(basis) != basis {
                    return Err(Error::Parse("mixed basis prefixes".into()));
                }
                coeffs.add_term(part, &coeff);
            }
            None => coeffs.add_term(Partition::empty(), &coeff),
        }
    }
    Ok((kind, coeffs))
}
