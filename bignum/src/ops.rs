/// Derives the by-value and by-reference forms of a binary operator from an
/// `OpAssign<&T>` impl.
macro_rules! forward_binop {
  ($Ty:ident, $Op:ident::$op:ident, $OpAssign:ident::$op_assign:ident) => {
    impl $OpAssign<$Ty> for $Ty {
      fn $op_assign(&mut self, rhs: $Ty) {
        $OpAssign::$op_assign(self, &rhs)
      }
    }

    impl $Op<&$Ty> for $Ty {
      type Output = $Ty;

      fn $op(mut self, rhs: &$Ty) -> $Ty {
        $OpAssign::$op_assign(&mut self, rhs);
        self
      }
    }

    impl $Op<$Ty> for $Ty {
      type Output = $Ty;

      fn $op(mut self, rhs: $Ty) -> $Ty {
        $OpAssign::$op_assign(&mut self, &rhs);
        self
      }
    }

    impl $Op<&$Ty> for &$Ty {
      type Output = $Ty;

      fn $op(self, rhs: &$Ty) -> $Ty {
        let mut out = self.clone();
        $OpAssign::$op_assign(&mut out, rhs);
        out
      }
    }

    impl $Op<$Ty> for &$Ty {
      type Output = $Ty;

      fn $op(self, rhs: $Ty) -> $Ty {
        let mut out = self.clone();
        $OpAssign::$op_assign(&mut out, &rhs);
        out
      }
    }
  };
}

/// Derives `Sum` and `Product` over owned and borrowed items.
macro_rules! forward_fold {
  ($Ty:ident, $zero:expr, $one:expr) => {
    impl Sum for $Ty {
      fn sum<I: Iterator<Item = $Ty>>(iter: I) -> $Ty {
        iter.fold($zero, |acc, x| acc + x)
      }
    }

    impl<'a> Sum<&'a $Ty> for $Ty {
      fn sum<I: Iterator<Item = &'a $Ty>>(iter: I) -> $Ty {
        iter.fold($zero, |acc, x| acc + x)
      }
    }

    impl Product for $Ty {
      fn product<I: Iterator<Item = $Ty>>(iter: I) -> $Ty {
        iter.fold($one, |acc, x| acc * x)
      }
    }

    impl<'a> Product<&'a $Ty> for $Ty {
      fn product<I: Iterator<Item = &'a $Ty>>(iter: I) -> $Ty {
        iter.fold($one, |acc, x| acc * x)
      }
    }
  };
}

pub(crate) use forward_binop;
pub(crate) use forward_fold;
