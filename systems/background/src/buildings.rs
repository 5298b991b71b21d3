use glam::Vec2;
use rand::{seq::SliceRandom, Rng};
use risk_rush_core::{Aabb, Rgb};

const PALETTE: [Rgb; 4] = [
    Rgb::from_rgb(100, 100, 120),
    Rgb::from_rgb(120, 120, 140),
    Rgb::from_rgb(80, 80, 100),
    Rgb::from_rgb(140, 140, 160),
];
const HEIGHT_VARIATION: f32 = 0.3;
const MIN_HEIGHT: f32 = 30.0;
const MAX_HEIGHT_FRACTION: f32 = 0.8;
const MIN_RECYCLED_WIDTH: f32 = 20.0;
const MAX_RECYCLED_WIDTH: f32 = 250.0;
const WINDOWED_CHANCE: f64 = 0.7;
const LIT_CHANCE: f64 = 0.6;

/// Parallax depth of a building silhouette.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Layer {
    /// Slowest, furthest row.
    Far,
    /// Middle row.
    Mid,
    /// Fastest row closest to the road.
    Near,
}

impl Layer {
    /// Layers in back-to-front draw order.
    pub const ALL: [Layer; 3] = [Self::Far, Self::Mid, Self::Near];

    /// Number of buildings kept in the layer.
    #[must_use]
    pub const fn count(self) -> usize {
        match self {
            Self::Far => 10,
            Self::Mid => 8,
            Self::Near => 6,
        }
    }

    /// Fraction of the world speed the layer scrolls at.
    #[must_use]
    pub const fn speed_factor(self) -> f32 {
        match self {
            Self::Far => 0.2,
            Self::Mid => 0.4,
            Self::Near => 0.7,
        }
    }

    const fn baseline_offset(self) -> f32 {
        match self {
            Self::Far => 150.0,
            Self::Mid => 80.0,
            Self::Near => 20.0,
        }
    }

    const fn base_height(self) -> f32 {
        match self {
            Self::Far => 100.0,
            Self::Mid => 150.0,
            Self::Near => 80.0,
        }
    }

    const fn width_range(self) -> (u32, u32) {
        match self {
            Self::Far => (30, 80),
            Self::Mid => (40, 120),
            Self::Near => (50, 100),
        }
    }
}

/// Grid of window cells with a lit pattern fixed until the building recycles.
#[derive(Clone, Debug, PartialEq)]
struct WindowGrid {
    cell: Vec2,
    gap: Vec2,
    columns: usize,
    lit: Vec<bool>,
}

impl WindowGrid {
    fn generate<R: Rng>(rng: &mut R, size: Vec2) -> Option<Self> {
        if size.x <= 20.0 || size.y <= 20.0 {
            return None;
        }
        let cell = Vec2::new((size.x * 0.15).floor().max(5.0), (size.y * 0.1).floor().max(5.0));
        let gap = Vec2::new((cell.x * 0.5).floor().max(3.0), (cell.y * 0.5).floor().max(3.0));
        let columns = ((size.x - gap.x) / (cell.x + gap.x)).floor() as usize;
        let rows = ((size.y - gap.y) / (cell.y + gap.y)).floor() as usize;
        if columns == 0 || rows == 0 {
            return None;
        }
        let lit = (0..columns * rows).map(|_| rng.gen_bool(LIT_CHANCE)).collect();
        Some(Self {
            cell,
            gap,
            columns,
            lit,
        })
    }

    fn lit_cells(&self, origin: Vec2) -> impl Iterator<Item = Aabb> + '_ {
        let step = self.cell + self.gap;
        let columns = self.columns;
        let cell = self.cell;
        let gap = self.gap;
        self.lit
            .iter()
            .enumerate()
            .filter(|(_, lit)| **lit)
            .map(move |(index, _)| {
                let column = (index % columns) as f32;
                let row = (index / columns) as f32;
                let min = origin + gap + Vec2::new(column * step.x, row * step.y);
                Aabb::from_bottom_left(min.x, min.y + cell.y, cell.x, cell.y)
            })
    }
}

/// Procedurally regenerated building silhouette.
#[derive(Clone, Debug, PartialEq)]
pub struct Building {
    layer: Layer,
    baseline: f32,
    left: f32,
    width: f32,
    height: f32,
    color: Rgb,
    windowed: bool,
    windows: Option<WindowGrid>,
}

impl Building {
    pub(crate) fn new<R: Rng>(rng: &mut R, layer: Layer, horizon: f32, screen_width: f32) -> Self {
        let (min_width, max_width) = layer.width_range();
        let baseline = horizon - layer.baseline_offset();
        let mut building = Self {
            layer,
            baseline,
            left: rng.gen_range(0.0..=screen_width.max(0.0)),
            width: rng.gen_range(min_width..=max_width) as f32,
            height: layer.base_height(),
            color: PALETTE.choose(rng).copied().unwrap_or(PALETTE[0]),
            windowed: rng.gen_bool(WINDOWED_CHANCE),
            windows: None,
        };
        building.height = building.vary_height(rng, layer.base_height());
        building.regenerate_windows(rng);
        building
    }

    /// Parallax layer the building belongs to.
    #[must_use]
    pub fn layer(&self) -> Layer {
        self.layer
    }

    /// Fill colour.
    #[must_use]
    pub fn color(&self) -> Rgb {
        self.color
    }

    /// Screen-space rectangle standing on the layer baseline.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_bottom_left(self.left, self.baseline, self.width, self.height)
    }

    /// Whether the building carries a window grid.
    #[must_use]
    pub fn has_windows(&self) -> bool {
        self.windows.is_some()
    }

    /// Lit window rectangles in screen space.
    pub fn lit_windows(&self) -> impl Iterator<Item = Aabb> + '_ {
        let origin = self.bounds().min();
        self.windows
            .iter()
            .flat_map(move |grid| grid.lit_cells(origin))
    }

    fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    fn vary_height<R: Rng>(&self, rng: &mut R, from: f32) -> f32 {
        let variation = self.layer.base_height() * HEIGHT_VARIATION;
        let ceiling = (self.baseline * MAX_HEIGHT_FRACTION).max(MIN_HEIGHT);
        (from + rng.gen_range(-variation..=variation))
            .floor()
            .clamp(MIN_HEIGHT, ceiling)
    }

    /// Scrolls left; once fully off-screen re-enters at the right edge reshaped.
    pub(crate) fn scroll<R: Rng>(&mut self, rng: &mut R, world_speed: f32, screen_width: f32) {
        self.left -= world_speed * self.layer.speed_factor();
        if self.left + self.width >= 0.0 {
            return;
        }

        self.left = screen_width;
        let min_width = (self.width / 1.5).floor().max(MIN_RECYCLED_WIDTH);
        let max_width = (self.width * 1.5).floor().min(MAX_RECYCLED_WIDTH).max(min_width);
        self.width = rng.gen_range(min_width..=max_width).floor();
        self.height = self.vary_height(rng, self.height);
        self.regenerate_windows(rng);
    }

    fn regenerate_windows<R: Rng>(&mut self, rng: &mut R) {
        self.windows = if self.windowed {
            WindowGrid::generate(rng, self.size())
        } else {
            None
        };
    }
}
