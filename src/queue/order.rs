use std::cmp::Ordering;
use std::fmt;

/// Three-way comparison over priorities.
///
/// `Less` means the first priority is more urgent and belongs nearer the
/// root. Only priorities are ever compared, never payloads.
pub trait PriorityOrder<P> {
    fn compare(&self, a: &P, b: &P) -> Ordering;
}

/// Lower value first (min-heap). Incomparable values such as NaN tie.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ascending;

impl<P: PartialOrd> PriorityOrder<P> for Ascending {
    fn compare(&self, a: &P, b: &P) -> Ordering {
        a.partial_cmp(b).unwrap_or(Ordering::Equal)
    }
}

/// Higher value first (max-heap)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Descending;

impl<P: PartialOrd> PriorityOrder<P> for Descending {
    fn compare(&self, a: &P, b: &P) -> Ordering {
        b.partial_cmp(a).unwrap_or(Ordering::Equal)
    }
}

/// Wraps a comparator closure
#[derive(Clone, Copy)]
pub struct FnOrder<F>(pub F);

impl<P, F> PriorityOrder<P> for FnOrder<F>
where
    F: Fn(&P, &P) -> Ordering,
{
    fn compare(&self, a: &P, b: &P) -> Ordering {
        (self.0)(a, b)
    }
}

impl<F> fmt::Debug for FnOrder<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnOrder")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_orders() {
        assert_eq!(Ascending.compare(&1, &3), Ordering::Less);
        assert_eq!(Descending.compare(&1, &3), Ordering::Greater);
        assert_eq!(Ascending.compare(&f64::NAN, &1.0), Ordering::Equal);
    }

    #[test]
    fn closure_order() {
        // Even numbers first, then ascending
        let order = FnOrder(|a: &u32, b: &u32| (a % 2).cmp(&(b % 2)).then(a.cmp(b)));
        assert_eq!(order.compare(&4, &1), Ordering::Less);
        assert_eq!(order.compare(&3, &5), Ordering::Less);
    }
}
