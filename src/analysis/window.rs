/// Fixed-capacity ring of complex samples.
///
/// Always holds exactly `capacity` samples. Pushing `k` samples drops the `k`
/// oldest; `head` indexes the oldest sample.
#[derive(Clone, Debug)]
pub struct AnalysisWindow {
    real: Vec<f64>,
    imag: Vec<f64>,
    head: usize,
}

impl AnalysisWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            real: vec![0.0; capacity],
            imag: vec![0.0; capacity],
            head: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.real.len()
    }

    pub fn reset(&mut self) {
        self.real.fill(0.0);
        self.imag.fill(0.0);
        self.head = 0;
    }

    /// Copy the window, oldest sample first, into `real_out`/`imag_out`.
    pub fn linearize_into(&self, real_out: &mut [f64], imag_out: &mut [f64]) {
        let n = self.capacity();
        let tail = n - self.head;
        real_out[..tail].copy_from_slice(&self.real[self.head..]);
        real_out[tail..n].copy_from_slice(&self.real[..self.head]);
        imag_out[..tail].copy_from_slice(&self.imag[self.head..]);
        imag_out[tail..n].copy_from_slice(&self.imag[..self.head]);
    }

    /// The window as it would read after pushing `real`/`imag`, without
    /// touching the ring.
    pub fn stage(&self, real: &[f64], imag: &[f64], real_out: &mut [f64], imag_out: &mut [f64]) {
        debug_assert_eq!(real.len(), imag.len());
        let n = self.capacity();
        let len = real.len();
        if len >= n {
            real_out[..n].copy_from_slice(&real[len - n..]);
            imag_out[..n].copy_from_slice(&imag[len - n..]);
            return;
        }
        self.linearize_into(real_out, imag_out);
        let keep = n - len;
        real_out.copy_within(len..n, 0);
        imag_out.copy_within(len..n, 0);
        real_out[keep..n].copy_from_slice(real);
        imag_out[keep..n].copy_from_slice(imag);
    }

    /// Append samples, overwriting the oldest ones.
    pub fn push(&mut self, real: &[f64], imag: &[f64]) {
        debug_assert_eq!(real.len(), imag.len());
        let n = self.capacity();
        if n == 0 {
            return;
        }
        let len = real.len();
        if len >= n {
            self.real.copy_from_slice(&real[len - n..]);
            self.imag.copy_from_slice(&imag[len - n..]);
            self.head = 0;
            return;
        }
        for (&re, &im) in real.iter().zip(imag) {
            self.real[self.head] = re;
            self.imag[self.head] = im;
            self.head = (self.head + 1) % n;
        }
    }

    /// Owned copies of the window contents, oldest first.
    pub fn to_vecs(&self) -> (Vec<f64>, Vec<f64>) {
        let n = self.capacity();
        let mut real = vec![0.0; n];
        let mut imag = vec![0.0; n];
        self.linearize_into(&mut real, &mut imag);
        (real, imag)
    }
}
