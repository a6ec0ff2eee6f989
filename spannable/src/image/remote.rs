// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use super::{draw_image, fit_line_metrics, Align, ImageLabel};
use crate::metrics::{FontMetrics, PixelInsets, PixelRect};
use crate::render::{Canvas, Drawable, LineBox, ReplacementSpan, TextMeasure, TextPaint};

/// Size value meaning "use the bounds of the covered text".
pub const MATCH_TEXT: i32 = -1;

/// A request handed to an [`ImageLoader`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageRequest {
    /// What to load.
    pub url: Arc<str>,
    /// Target width, or `None` for the original width.
    pub width: Option<i32>,
    /// Target height, or `None` for the original height.
    pub height: Option<i32>,
    /// How often animated images repeat, or `None` to repeat forever.
    pub loop_count: Option<u32>,
}

/// Fetches images for [`RemoteImage`] spans.
///
/// Loading may complete synchronously inside [`ImageLoader::load`] or later from any thread,
/// through the [`LoadHandle`].
pub trait ImageLoader: Send + Sync {
    /// Starts loading `request`, reporting progress through `handle`.
    fn load(&self, request: ImageRequest, handle: LoadHandle);
}

/// The loading state of a [`RemoteImage`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LoadState {
    /// Nothing was requested yet.
    #[default]
    Idle,
    /// The loader is working; the placeholder is shown.
    Loading,
    /// The image arrived.
    Ready(Drawable),
    /// Loading failed; the error image, or else the placeholder, is shown.
    Failed(Option<Drawable>),
}

type Invalidate = Arc<dyn Fn() + Send + Sync>;

/// Reports loader progress back to a [`RemoteImage`].
#[derive(Clone)]
pub struct LoadHandle {
    state: Arc<Mutex<LoadState>>,
    url: Arc<str>,
    invalidate: Option<Invalidate>,
}

impl fmt::Debug for LoadHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadHandle")
            .field("url", &self.url)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl LoadHandle {
    /// The image arrived.
    pub fn ready(&self, drawable: Drawable) {
        log::debug!("image ready: {}", self.url);
        self.set(LoadState::Ready(drawable));
    }

    /// Loading failed. `error_image` is shown instead, if given.
    pub fn failed(&self, error_image: Option<Drawable>, reason: &str) {
        log::warn!("failed to load image {}: {reason}", self.url);
        self.set(LoadState::Failed(error_image));
    }

    fn set(&self, state: LoadState) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = state;
        if let Some(invalidate) = &self.invalidate {
            invalidate();
        }
    }
}

/// An image loaded on demand by an [`ImageLoader`], drawn in place of the text it covers.
///
/// The first measurement or draw starts the load. Until the image arrives the placeholder is
/// shown; if loading fails the error image is shown, or the placeholder if there is none. Load
/// failures never surface as errors, they are logged and drawn as the fallback.
///
/// A requested width or height of [`MATCH_TEXT`] sizes the image to the covered text's bounds.
pub struct RemoteImage {
    url: Arc<str>,
    loader: Arc<dyn ImageLoader>,
    placeholder: Option<Drawable>,
    error_image: Option<Drawable>,
    width: i32,
    height: i32,
    padding: PixelInsets,
    margin_left: i32,
    margin_right: i32,
    align: Align,
    loop_count: Option<u32>,
    label: Option<ImageLabel>,
    invalidate: Option<Invalidate>,
    state: Arc<Mutex<LoadState>>,
    text_bounds: Mutex<PixelRect>,
}

impl fmt::Debug for RemoteImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteImage")
            .field("url", &self.url)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("align", &self.align)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl PartialEq for RemoteImage {
    fn eq(&self, other: &Self) -> bool {
        self.url == other.url
            && self.placeholder == other.placeholder
            && self.error_image == other.error_image
            && (self.width, self.height) == (other.width, other.height)
            && self.padding == other.padding
            && (self.margin_left, self.margin_right) == (other.margin_left, other.margin_right)
            && self.align == other.align
            && self.loop_count == other.loop_count
            && self.label == other.label
    }
}

impl RemoteImage {
    /// A span loading `url` through `loader`.
    pub fn new(url: impl Into<Arc<str>>, loader: Arc<dyn ImageLoader>) -> Self {
        Self {
            url: url.into(),
            loader,
            placeholder: None,
            error_image: None,
            width: 0,
            height: 0,
            padding: PixelInsets::default(),
            margin_left: 0,
            margin_right: 0,
            align: Align::default(),
            loop_count: None,
            label: None,
            invalidate: None,
            state: Arc::new(Mutex::new(LoadState::Idle)),
            text_bounds: Mutex::new(PixelRect::default()),
        }
    }

    /// Shown while loading. Its aspect ratio also sizes the span until the image arrives.
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: Drawable) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    /// Shown when loading fails.
    #[must_use]
    pub fn with_error_image(mut self, error_image: Drawable) -> Self {
        self.error_image = Some(error_image);
        self
    }

    /// Sets the requested size. 0 uses the image's size, [`MATCH_TEXT`] the covered text's.
    #[must_use]
    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Sets padding added around the image.
    #[must_use]
    pub fn with_padding(mut self, padding: PixelInsets) -> Self {
        self.padding = padding;
        self
    }

    /// Sets the horizontal margins.
    #[must_use]
    pub fn with_margin_horizontal(mut self, left: i32, right: i32) -> Self {
        self.margin_left = left;
        self.margin_right = right;
        self
    }

    /// Sets the vertical alignment.
    #[must_use]
    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Sets how often animated images repeat.
    #[must_use]
    pub fn with_loop_count(mut self, loop_count: u32) -> Self {
        self.loop_count = Some(loop_count);
        self
    }

    /// Draws the covered text on top of the image.
    #[must_use]
    pub fn with_label(mut self, label: ImageLabel) -> Self {
        self.label = Some(label);
        self
    }

    /// Called whenever loading changes what the span shows, so the host can redraw.
    #[must_use]
    pub fn on_invalidate(mut self, invalidate: impl Fn() + Send + Sync + 'static) -> Self {
        self.invalidate = Some(Arc::new(invalidate));
        self
    }

    /// The image URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The current loading state.
    pub fn state(&self) -> LoadState {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The drawable to show right now and its bounds, starting the load on first use.
    pub fn current_drawable(&self) -> Option<(Drawable, PixelRect)> {
        self.start_loading();
        match self.state() {
            LoadState::Idle | LoadState::Loading | LoadState::Failed(None) => self
                .placeholder
                .as_ref()
                .map(|placeholder| (placeholder.clone(), self.fitted_bounds(placeholder))),
            LoadState::Ready(drawable) => {
                let bounds =
                    PixelRect::from_size(drawable.intrinsic_width, drawable.intrinsic_height);
                Some((drawable, bounds))
            }
            LoadState::Failed(Some(error_image)) => {
                let bounds = self.fitted_bounds(&error_image);
                Some((error_image, bounds))
            }
        }
    }

    fn start_loading(&self) {
        {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            if *state != LoadState::Idle {
                return;
            }
            *state = LoadState::Loading;
        }
        // The lock is released: loaders may complete synchronously.
        let handle = LoadHandle {
            state: Arc::clone(&self.state),
            url: Arc::clone(&self.url),
            invalidate: self.invalidate.clone(),
        };
        let request = ImageRequest {
            url: Arc::clone(&self.url),
            width: (self.width > 0).then_some(self.width),
            height: (self.height > 0).then_some(self.height),
            loop_count: self.loop_count,
        };
        log::debug!("loading image {}", self.url);
        self.loader.load(request, handle);
    }

    fn matches_text(&self) -> bool {
        self.width == MATCH_TEXT || self.height == MATCH_TEXT
    }

    fn update_text_bounds(&self, text: &str, paint: &dyn TextMeasure) {
        if self.matches_text() {
            *self
                .text_bounds
                .lock()
                .unwrap_or_else(PoisonError::into_inner) = paint.text_bounds(text);
        }
    }

    /// Bounds of a placeholder or error image: fixed-ratio scaled, then padded.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "Scaled pixel sizes stay inside the i32 range."
    )]
    fn fitted_bounds(&self, drawable: &Drawable) -> PixelRect {
        let text = *self
            .text_bounds
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let intrinsic_width = drawable.intrinsic_width;
        let intrinsic_height = drawable.intrinsic_height;
        let ratio = f64::from(intrinsic_width) / f64::from(intrinsic_height);
        let mut width = match self.width {
            w if w > 0 => w,
            MATCH_TEXT => text.width(),
            _ => intrinsic_width,
        };
        let mut height = match self.height {
            h if h > 0 => h,
            MATCH_TEXT => text.height(),
            _ => intrinsic_height,
        };
        if self.width != MATCH_TEXT && intrinsic_width > intrinsic_height {
            height = (f64::from(width) / ratio) as i32;
        } else if self.height != MATCH_TEXT && intrinsic_width < intrinsic_height {
            width = (f64::from(height) * ratio) as i32;
        }
        width += self.padding.horizontal() + drawable.padding.horizontal();
        height += self.padding.vertical() + drawable.padding.vertical();
        PixelRect::from_size(width, height)
    }
}

impl ReplacementSpan for RemoteImage {
    fn size(
        &self,
        text: &str,
        paint: &dyn TextMeasure,
        line_metrics: Option<&mut FontMetrics>,
    ) -> i32 {
        self.update_text_bounds(text, paint);
        let bounds = self.current_drawable().map_or(
            PixelRect::from_size(self.width, self.height),
            |(_, bounds)| bounds,
        );
        if let Some(line) = line_metrics {
            fit_line_metrics(self.align, bounds, paint.font_metrics(), line);
        }
        bounds.right + self.margin_left + self.margin_right
    }

    fn draw(
        &self,
        canvas: &mut dyn Canvas,
        text: &str,
        line: LineBox,
        paint: &dyn TextMeasure,
        text_paint: &TextPaint,
    ) {
        self.update_text_bounds(text, paint);
        let Some((drawable, bounds)) = self.current_drawable() else {
            return;
        };
        draw_image(
            canvas,
            &drawable,
            bounds,
            self.align,
            self.margin_left,
            self.label.as_ref(),
            text,
            line,
            paint,
            text_paint,
        );
    }
}
