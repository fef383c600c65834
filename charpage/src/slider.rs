//! Image slider: index arithmetic and the script embedded in generated pages
//!
//! [`SliderCursor`] follows the same rules as [`SLIDER_SCRIPT`] so the
//! exporter and the browser agree on which image is shown first.

/// Current position in a slider of `len` images
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderCursor {
    index: usize,
    len: usize,
}

impl SliderCursor {
    /// Start at the first image
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    /// Start at the first image flagged active, or 0 if none is
    pub fn from_active(active: &[bool]) -> Self {
        let index = active.iter().position(|&a| a).unwrap_or(0);
        Self {
            index,
            len: active.len(),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Step back one image, wrapping to the last
    pub fn step_back(&mut self) -> usize {
        if self.len > 0 {
            self.index = (self.index + self.len - 1) % self.len;
        }
        self.index
    }

    /// Step forward one image, wrapping to the first
    pub fn step_forward(&mut self) -> usize {
        if self.len > 0 {
            self.index = (self.index + 1) % self.len;
        }
        self.index
    }

    /// Jump straight to `index` (thumbnail click); out-of-range is ignored
    pub fn jump(&mut self, index: usize) -> usize {
        if index < self.len {
            self.index = index;
        }
        self.index
    }

    /// Whether the image at `index` carries the `active` class
    pub fn is_active(&self, index: usize) -> bool {
        self.len > 0 && index == self.index
    }
}

/// Script driving the slider in the generated page
///
/// Inert unless an element with id `slider` exists. Builds one thumbnail
/// button per `.mainimg`, then keeps exactly one image and one thumbnail
/// marked `active`.
pub const SLIDER_SCRIPT: &str = r#"(() => {
  const slider = document.getElementById('slider');
  if (!slider) return;
  const prev = slider.querySelector('.navbtn.prev');
  const next = slider.querySelector('.navbtn.next');
  const imgs = [...slider.querySelectorAll('.mainimg')];
  const thumbs = slider.querySelector('.thumbs');
  let idx = imgs.findIndex(img => img.classList.contains('active'));
  if (idx < 0) idx = 0;

  imgs.forEach((img, i) => {
    const b = document.createElement('button');
    b.className = 'thumb';
    const t = document.createElement('img');
    t.alt = 'thumb' + (i + 1);
    t.src = img.src;
    b.appendChild(t);
    b.onclick = () => { idx = i; render(); };
    thumbs.appendChild(b);
  });

  function render() {
    imgs.forEach((el, i) => el.classList.toggle('active', i === idx));
    [...thumbs.children].forEach((el, i) => el.classList.toggle('active', i === idx));
  }
  prev?.addEventListener('click', () => {
    if (!imgs.length) return;
    idx = (idx - 1 + imgs.length) % imgs.length;
    render();
  });
  next?.addEventListener('click', () => {
    if (!imgs.length) return;
    idx = (idx + 1) % imgs.length;
    render();
  });
  render();
})();"#;
