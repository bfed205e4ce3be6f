use crate::errors::GridError;
use crate::geometry::Coord;


/// Cell classifier - which characters are walls and which mark the start / end
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridLegend {
    pub wall: char,
    pub open: char,
    pub start: char,
    pub end: char,
}

impl Default for GridLegend {
    fn default() -> Self {
        Self { wall: '#', open: '.', start: 'S', end: 'E' }
    }
}

impl GridLegend {
    pub fn is_passable(&self, cell: char) -> bool {
        cell != self.wall
    }
}


/// Every cell must be addressable by an i32 `Coord`
fn check_size(width: usize, height: usize) -> Result<(), GridError> {
    if i32::try_from(width).is_err() || i32::try_from(height).is_err() {
        return Err(GridError::TooLarge { width, height });
    }
    Ok(())
}


/// Rectangular grid of characters, stored row-major
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<char>,
    width: usize,
    height: usize,
}

impl Grid {

    /// Parse newline separated rows - every row must have the same length
    /// Trailing blank lines are ignored
    pub fn parse(input: &str) -> Result<Self, GridError> {
        let rows: Vec<&str> = input
            .trim_end_matches(['\n', '\r'])
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .collect();

        let width = rows.first().map_or(0, |row| row.chars().count());
        if width == 0 {
            return Err(GridError::Empty);
        }

        check_size(width, rows.len())?;

        let mut cells = Vec::with_capacity(width * rows.len());
        for (row, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(GridError::Ragged { row, expected: width, found });
            }
            cells.extend(line.chars());
        }

        Ok(Self { cells, width, height: rows.len() })
    }

    /// Open grid with walls placed at `obstacles`
    pub fn from_obstacles<I>(width: usize, height: usize, obstacles: I, legend: &GridLegend) -> Result<Self, GridError>
    where
        I: IntoIterator<Item = Coord>,
    {
        if width == 0 || height == 0 {
            return Err(GridError::Empty);
        }
        check_size(width, height)?;
        let mut grid = Self { cells: vec![legend.open; width * height], width, height };
        for obstacle in obstacles {
            grid.set(obstacle, legend.wall)?;
        }
        Ok(grid)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, pos: Coord) -> bool {
        self.index(pos).is_some()
    }

    pub fn get(&self, pos: Coord) -> Option<char> {
        self.index(pos).map(|i| self.cells[i])
    }

    pub fn set(&mut self, pos: Coord, cell: char) -> Result<(), GridError> {
        let i = self.index(pos).ok_or(GridError::OutOfBounds(pos))?;
        self.cells[i] = cell;
        Ok(())
    }

    /// First position (row-major) holding `cell`
    pub fn find(&self, cell: char) -> Option<Coord> {
        self.cells.iter().position(|&c| c == cell).map(|i| self.coord(i))
    }

    /// All positions with their cell, row-major
    pub fn iter(&self) -> impl Iterator<Item = (Coord, char)> + '_ {
        self.cells.iter().enumerate().map(|(i, &c)| (self.coord(i), c))
    }

    fn coord(&self, index: usize) -> Coord {
        Coord::new((index % self.width) as i32, (index / self.width) as i32)
    }

    fn index(&self, pos: Coord) -> Option<usize> {
        let x = usize::try_from(pos.x).ok()?;
        let y = usize::try_from(pos.y).ok()?;
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }
}
