//! Knuth's subtractive random number generator.
//!
//! This is the seeded generator of the .NET runtime (`System.Random(int)`),
//! reproduced bit for bit so that instances generated from a given seed
//! match the published benchmark instances.

const MBIG: i32 = i32::MAX;
const MSEED: i32 = 161_803_398;
const STATE_LEN: usize = 56;

/// Lagged-Fibonacci generator with a 55-word state.
#[derive(Debug, Clone)]
pub struct SubtractiveRng {
    state: [i32; STATE_LEN],
    next: usize,
    next_p: usize,
}

impl SubtractiveRng {
    pub fn new(seed: i32) -> Self {
        let subtraction = if seed == i32::MIN {
            i32::MAX
        } else {
            seed.abs()
        };

        let mut state = [0i32; STATE_LEN];
        let mut mj = MSEED.wrapping_sub(subtraction);
        state[55] = mj;
        let mut mk: i32 = 1;
        for i in 1..55 {
            let ii = (21 * i) % 55;
            state[ii] = mk;
            mk = mj.wrapping_sub(mk);
            if mk < 0 {
                mk = mk.wrapping_add(MBIG);
            }
            mj = state[ii];
        }

        for _ in 1..5 {
            for i in 1..STATE_LEN {
                state[i] = state[i].wrapping_sub(state[1 + (i + 30) % 55]);
                if state[i] < 0 {
                    state[i] = state[i].wrapping_add(MBIG);
                }
            }
        }

        Self {
            state,
            next: 0,
            next_p: 21,
        }
    }

    fn internal_sample(&mut self) -> i32 {
        let mut next = self.next + 1;
        if next >= STATE_LEN {
            next = 1;
        }
        let mut next_p = self.next_p + 1;
        if next_p >= STATE_LEN {
            next_p = 1;
        }

        let mut value = self.state[next].wrapping_sub(self.state[next_p]);
        if value == MBIG {
            value -= 1;
        }
        if value < 0 {
            value = value.wrapping_add(MBIG);
        }

        self.state[next] = value;
        self.next = next;
        self.next_p = next_p;
        value
    }

    /// Uniform sample in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.internal_sample()) * (1.0 / f64::from(MBIG))
    }

    /// Non-negative integer below `i32::MAX`.
    pub fn next_i32(&mut self) -> i32 {
        self.internal_sample()
    }
}
