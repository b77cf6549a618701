use std::collections::BTreeMap;

/// Vyváženie tried opakovaním riadkov menšinových tried, kým nedosiahnu
/// počet väčšinovej triedy. Efekt je rovnaký ako váhy tried `n / (k * n_c)`
/// pri celočíselnom pomere. Pôvodné riadky zostávajú na začiatku v pôvodnom poradí.
pub fn oversample_minority(x: &[Vec<f64>], y: &[i32]) -> (Vec<Vec<f64>>, Vec<i32>)
{
    let mut by_class: BTreeMap<i32, Vec<usize>> = BTreeMap::new();
    for (idx, label) in y.iter().enumerate() {
        by_class.entry(*label).or_default().push(idx);
    }

    let target = by_class.values().map(Vec::len).max().unwrap_or(0);
    let mut x_out = x.to_vec();
    let mut y_out = y.to_vec();

    for (label, indices) in &by_class
    {
        for k in 0..target - indices.len()
        {
            let src = indices[k % indices.len()];
            x_out.push(x[src].clone());
            y_out.push(*label);
        }
    }

    (x_out, y_out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minority_class_is_repeated_up_to_majority() {
        let x: Vec<Vec<f64>> = (0..7).map(|i| vec![i as f64]).collect();
        let y = vec![0, 0, 0, 0, 0, 1, 1];

        let (xb, yb) = oversample_minority(&x, &y);
        assert_eq!(yb.iter().filter(|&&l| l == 0).count(), 5);
        assert_eq!(yb.iter().filter(|&&l| l == 1).count(), 5);
        assert_eq!(&xb[..7], &x[..]);
        assert_eq!(&xb[7..], &[vec![5.0], vec![6.0], vec![5.0]]);
    }

    #[test]
    fn balanced_input_is_unchanged() {
        let x = vec![vec![1.0], vec![2.0]];
        let y = vec![1, 0];
        assert_eq!(oversample_minority(&x, &y), (x.clone(), y.clone()));
    }
}
