use smartcore::linalg::basic::matrix::DenseMatrix;

use crate::error::Result;

/// Transformácia príznakov, ktorá sa najprv naučí parametre a potom ich aplikuje
pub trait DataProcessor
{
    fn get_name(&self) -> &str;

    /// Naučí parametre z (trénovacích) dát
    fn fit(&mut self, data: &DenseMatrix<f64>) -> Result<()>;

    /// Aplikuje naučené parametre, dáta nemení
    fn transform(&self, data: &DenseMatrix<f64>) -> Result<DenseMatrix<f64>>;

    fn fit_transform(&mut self, data: &DenseMatrix<f64>) -> Result<DenseMatrix<f64>>
    {
        self.fit(data)?;
        self.transform(data)
    }
}
