// Affine (center-indexed) discrete convolution of a signal g with a room
// response h, repeated once per room. Both buffers are addressed relative to
// their midpoint: position t of a buffer of size s lives at floor(t + s/2).
// Contributions whose mapped index falls outside the buffer are dropped, so
// energy that walks off either edge is lost rather than wrapped.
//
// The loop bounds are not symmetric (output offsets start one slot early and
// the inner loop overshoots h by one), and the output buffer is indexed from
// ceil(|g|/2) + 1. Reference histograms depend on these exact bounds.

use log::trace;

use crate::sample::{normalize, Sample};

/// Midpoint-relative index: floor(t + floor(size) / 2).
#[inline]
fn affine(t: i64, size: usize) -> i64 {
    (t as f64 + (size as f64).floor() / 2.0).floor() as i64
}

#[inline]
fn in_range(idx: i64, size: usize) -> bool {
    idx >= 0 && (idx as usize) < size
}

/// Convolves signals against a fixed room response.
pub struct AffineConvolver<'h> {
    response: &'h [f64],
    // Inner offsets, [m_start, m_end)
    m_start: i64,
    m_end: i64,
}

impl<'h> AffineConvolver<'h> {
    pub fn new(response: &'h [f64]) -> Self {
        let h_size = response.len();
        let half_h = h_size as f64 / 2.0;
        AffineConvolver {
            response,
            m_start: -(half_h.ceil() as i64),
            m_end: (h_size as f64).floor() as i64 + 1,
        }
    }

    /// One convolution of `g` with the response into `out`, which is then
    /// normalized. Writes every slot of `out`.
    ///
    /// # Panics
    ///
    /// Panics if `out` is not as long as `g`.
    pub fn pass(&self, g: &[f64], out: &mut [f64]) {
        let g_size = g.len();
        let h_size = self.response.len();
        assert_eq!(out.len(), g_size, "output must match signal length");

        let half_g = g_size as f64 / 2.0;
        let t_start = -(half_g.ceil() as i64) - 1;
        let t_end = half_g.floor() as i64 - 1;
        let out_offset = half_g.ceil() as i64 + 1;

        for j in t_start..t_end {
            let mut sum = 0.0;
            for i in self.m_start..self.m_end {
                let g_idx = affine(j - i, g_size);
                let h_idx = affine(i, h_size);
                if !in_range(g_idx, g_size) || !in_range(h_idx, h_size) {
                    continue;
                }
                sum += g[g_idx as usize] * self.response[h_idx as usize];
            }
            out[(j + out_offset) as usize] = sum;
        }

        normalize(out);
    }

    /// Apply `rooms` passes, each pass feeding the next. Zero rooms returns
    /// `g` as is, without normalizing it.
    pub fn run<const N: usize>(&self, g: &Sample<N>, rooms: u32) -> Sample<N> {
        if rooms == 0 {
            return *g;
        }

        // Double buffer: each pass reads `current` and fills `next`.
        let mut current = Sample::from_slots(*g.slots());
        let mut next = Sample::<N>::from_slots([0.0; N]);
        for room in 0..rooms {
            self.pass(current.as_slice(), next.as_mut_slice());
            std::mem::swap(&mut current, &mut next);
            trace!("Room {}/{}: sum {:.6}", room + 1, rooms, current.sum());
        }
        current
    }
}

/// Convolve drum sample `g` with room response `h`, `rooms` times.
pub fn convolve<const N: usize, const M: usize>(
    g: &Sample<N>,
    h: &Sample<M>,
    rooms: u32,
) -> Sample<N> {
    AffineConvolver::new(h.as_slice()).run(g, rooms)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample<const N: usize>(values: [f64; N]) -> Sample<N> {
        Sample::from_slots(values)
    }

    #[test]
    fn affine_index_floors_real_halves() {
        assert_eq!(affine(0, 100), 50);
        assert_eq!(affine(-51, 100), -1);
        assert_eq!(affine(0, 4), 2);
        assert_eq!(affine(-2, 3), -1);
        assert_eq!(affine(1, 3), 2);
    }

    #[test]
    fn zero_rooms_returns_input_untouched() {
        let g = sample([2.0, 0.0, 6.0, 0.0]);
        let h = sample([0.0, 1.0, 0.0, 0.0]);
        assert_eq!(convolve(&g, &h, 0), g);
    }

    #[test]
    fn impulse_before_center_is_identity() {
        let g = sample([0.0, 0.0, 1.0, 0.0]);
        let h = sample([0.0, 1.0, 0.0, 0.0]);
        let out = convolve(&g, &h, 1);
        assert_eq!(out.as_slice(), &[0.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn response_at_center_shifts_right() {
        let g = sample([0.0, 0.0, 1.0, 0.0]);
        let h = sample([0.0, 0.0, 1.0, 0.0]);
        let out = convolve(&g, &h, 1);
        assert_eq!(out.as_slice(), &[0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn energy_past_the_edge_is_dropped() {
        let g = sample([0.0, 0.0, 0.0, 1.0]);
        let h = sample([0.0, 0.0, 1.0, 0.0]);
        let out = convolve(&g, &h, 1);
        assert_eq!(out.as_slice(), &[0.0; 4]);
    }

    #[test]
    fn centered_unit_impulses_are_a_fixed_point() {
        let mut g: Sample = Sample::new();
        let mut h: Sample = Sample::new();
        g.as_mut_slice()[49] = 1.0;
        h.as_mut_slice()[49] = 1.0;

        let out = convolve(&g, &h, 7);
        assert_eq!(out[49], 1.0);
        assert_eq!(out.sum(), 1.0);
    }

    #[test]
    fn two_tap_response_spreads_per_room() {
        let mut g: Sample = Sample::new();
        let mut h: Sample = Sample::new();
        g.as_mut_slice()[49] = 1.0;
        h.as_mut_slice()[49] = 0.5;
        h.as_mut_slice()[50] = 0.5;

        let once = convolve(&g, &h, 1);
        assert_eq!(once[49], 0.5);
        assert_eq!(once[50], 0.5);
        assert_eq!(once.sum(), 1.0);

        let twice = convolve(&g, &h, 2);
        assert_eq!(twice[49], 0.25);
        assert_eq!(twice[50], 0.5);
        assert_eq!(twice[51], 0.25);
        assert_eq!(twice.sum(), 1.0);
    }

    #[test]
    fn passes_are_normalized() {
        let g = sample([0.0, 3.0, 1.0, 0.0]);
        let h = sample([0.0, 2.0, 2.0, 0.0]);
        let out = convolve(&g, &h, 3);
        assert!((out.sum() - 1.0).abs() < 1e-12);
        assert!(out.as_slice().iter().all(|&v| v >= 0.0));
    }

    #[test]
    fn shorter_response_than_signal() {
        let g = sample([0.0, 0.0, 1.0, 0.0, 0.0, 0.0]);
        let h = sample([1.0, 0.0]);
        // h[0] sits one slot before the response midpoint.
        let out = convolve(&g, &h, 1);
        assert_eq!(out.as_slice(), &[0.0, 0.0, 1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn pass_writes_every_slot() {
        let g = [0.0, 1.0, 0.0, 0.0];
        let convolver = AffineConvolver::new(&[0.0, 1.0, 0.0, 0.0]);
        let mut out = [9.0; 4];
        convolver.pass(&g, &mut out);
        assert_eq!(out, [0.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    #[should_panic(expected = "output must match signal length")]
    fn pass_rejects_short_output() {
        let g = [0.0, 1.0, 0.0, 0.0];
        let convolver = AffineConvolver::new(&[0.0, 1.0, 0.0, 0.0]);
        let mut out = [0.0; 3];
        convolver.pass(&g, &mut out);
    }
}
