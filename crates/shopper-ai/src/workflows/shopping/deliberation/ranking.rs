use super::super::domain::ProductCandidate;
use std::cmp::Ordering;

/// Total order over candidates: rating descending (missing rating ranks as
/// 0), then price ascending with unpriced candidates last. Missing fields are
/// handled by the comparator itself, never by numeric sentinels that could
/// leak into arithmetic.
pub(crate) fn compare(a: &ProductCandidate, b: &ProductCandidate) -> Ordering {
    let by_rating = rating_weight(b).total_cmp(&rating_weight(a));
    if by_rating != Ordering::Equal {
        return by_rating;
    }

    match (a.price, b.price) {
        (Some(left), Some(right)) => left.cmp(&right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Rank candidates for one category. The sort is stable: ties after both
/// keys keep their supplied relative order, a documented tie-break rather
/// than an implementation accident.
pub(crate) fn rank<'a, I>(candidates: I) -> Vec<&'a ProductCandidate>
where
    I: IntoIterator<Item = &'a ProductCandidate>,
{
    let mut ranked: Vec<&ProductCandidate> = candidates.into_iter().collect();
    ranked.sort_by(|a, b| compare(a, b));
    ranked
}

fn rating_weight(candidate: &ProductCandidate) -> f32 {
    candidate.rating.unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::shopping::domain::DEFAULT_CURRENCY;

    fn candidate(name: &str, price: Option<u64>, rating: Option<f32>) -> ProductCandidate {
        ProductCandidate {
            name: name.to_string(),
            brand: None,
            price,
            currency: DEFAULT_CURRENCY.to_string(),
            rating,
            sustainability: None,
            category: None,
        }
    }

    #[test]
    fn higher_rating_wins_regardless_of_price() {
        let cheap = candidate("cheap", Some(100), Some(4.0));
        let rated = candidate("rated", Some(900), Some(4.8));
        let ranked = rank([&cheap, &rated]);
        assert_eq!(ranked[0].name, "rated");
    }

    #[test]
    fn equal_rating_prefers_lower_price() {
        let pricey = candidate("pricey", Some(900), Some(4.5));
        let bargain = candidate("bargain", Some(100), Some(4.5));
        let ranked = rank([&pricey, &bargain]);
        assert_eq!(ranked[0].name, "bargain");
    }

    #[test]
    fn missing_rating_ranks_as_zero() {
        let unrated = candidate("unrated", Some(100), None);
        let low = candidate("low", Some(100), Some(0.5));
        let ranked = rank([&unrated, &low]);
        assert_eq!(ranked[0].name, "low");
    }

    #[test]
    fn unpriced_sorts_after_priced_on_rating_tie() {
        let unpriced = candidate("unpriced", None, Some(4.5));
        let priced = candidate("priced", Some(500), Some(4.5));
        let ranked = rank([&unpriced, &priced]);
        assert_eq!(ranked[0].name, "priced");
    }

    #[test]
    fn full_ties_keep_supplied_order() {
        let first = candidate("first", Some(100), Some(4.0));
        let second = candidate("second", Some(100), Some(4.0));
        let ranked = rank([&first, &second]);
        assert_eq!(ranked[0].name, "first");
        assert_eq!(ranked[1].name, "second");
    }
}
